use crate::QueryField;
use std::{
    cell::Cell,
    collections::HashMap,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

/// Logical connector between the members of a [`QueryGroup`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    /// The literal SQL token of the conjunction.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }

    pub const fn ordinal(&self) -> u64 {
        *self as u64
    }
}

impl Display for Conjunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Conjunction::And => "And",
            Conjunction::Or => "Or",
        })
    }
}

/// A tree of predicates joined by a logical conjunction.
///
/// Groups nest: `(a AND b AND (c OR d))`. Identity follows the same
/// hash-as-equality policy as [`QueryField`], combining the conjunction
/// ordinal with the child hashes.
#[derive(Debug, Clone)]
pub struct QueryGroup {
    query_fields: Vec<QueryField>,
    query_groups: Vec<QueryGroup>,
    conjunction: Conjunction,
    hash: Cell<Option<u64>>,
}

impl QueryGroup {
    pub fn new(
        query_fields: Vec<QueryField>,
        query_groups: Vec<QueryGroup>,
        conjunction: Conjunction,
    ) -> Self {
        Self {
            query_fields,
            query_groups,
            conjunction,
            hash: Cell::new(None),
        }
    }

    pub fn and(query_fields: impl IntoIterator<Item = QueryField>) -> Self {
        Self::new(query_fields.into_iter().collect(), vec![], Conjunction::And)
    }

    pub fn or(query_fields: impl IntoIterator<Item = QueryField>) -> Self {
        Self::new(query_fields.into_iter().collect(), vec![], Conjunction::Or)
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn query_fields(&self) -> &[QueryField] {
        &self.query_fields
    }

    pub fn query_groups(&self) -> &[QueryGroup] {
        &self.query_groups
    }

    pub fn add_field(&mut self, field: QueryField) -> &mut Self {
        self.query_fields.push(field);
        self.hash.set(None);
        self
    }

    pub fn add_group(&mut self, group: QueryGroup) -> &mut Self {
        self.query_groups.push(group);
        self.hash.set(None);
        self
    }

    /// Whether the tree contains no predicate at all, however deeply nested.
    pub fn is_empty(&self) -> bool {
        self.query_fields.is_empty() && self.query_groups.iter().all(QueryGroup::is_empty)
    }

    /// Depth-first view over every predicate in the tree.
    pub fn all_fields(&self) -> Vec<&QueryField> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a QueryField>) {
        out.extend(self.query_fields.iter());
        for group in &self.query_groups {
            group.collect_fields(out);
        }
    }

    fn collect_fields_mut<'a>(&'a mut self, out: &mut Vec<&'a mut QueryField>) {
        out.extend(self.query_fields.iter_mut());
        for group in &mut self.query_groups {
            group.collect_fields_mut(out);
        }
    }

    /// Rename colliding parameter names across the whole tree so every bound
    /// parameter reaches the statement builder with a unique name: the first
    /// occurrence keeps its name, the next ones become `{name}_1`, `{name}_2`
    /// and so on.
    pub fn fix_parameters(&mut self) -> &mut Self {
        let mut fields = Vec::new();
        self.collect_fields_mut(&mut fields);
        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for field in fields {
            let name = field.parameter().name().to_owned();
            let seen = occurrences.entry(name.clone()).or_insert(0);
            if *seen > 0 {
                let renamed = format!("{}_{}", name, seen);
                log::debug!("Renaming duplicated parameter {name} to {renamed}");
                field.parameter_mut().set_name(renamed);
            }
            *seen += 1;
        }
        self.hash.set(None);
        self
    }

    /// Rewrite every contained parameter name for UPDATE statements. The
    /// same one-call-per-pass contract as [`QueryField::mark_for_update`]
    /// applies.
    pub fn mark_for_update(&mut self) {
        for field in &mut self.query_fields {
            field.mark_for_update();
        }
        for group in &mut self.query_groups {
            group.mark_for_update();
        }
    }

    /// Restore every contained predicate to its pristine state and clear the
    /// group's memoized hash.
    pub fn reset(&mut self) {
        for field in &mut self.query_fields {
            field.reset();
        }
        for group in &mut self.query_groups {
            group.reset();
        }
        self.hash.set(None);
    }

    /// Memoized combined hash of the conjunction and every child.
    pub fn hash_code(&self) -> u64 {
        if let Some(hash) = self.hash.get() {
            return hash;
        }
        let mut hash = self.conjunction.ordinal();
        for field in &self.query_fields {
            hash = hash.wrapping_add(field.hash_code());
        }
        for group in &self.query_groups {
            hash = hash.wrapping_add(group.hash_code());
        }
        self.hash.set(Some(hash));
        hash
    }
}

impl Display for QueryGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        for field in &self.query_fields {
            if !first {
                write!(f, " {} ", self.conjunction.as_sql())?;
            }
            first = false;
            write!(f, "{field}")?;
        }
        for group in &self.query_groups {
            if !first {
                write!(f, " {} ", self.conjunction.as_sql())?;
            }
            first = false;
            write!(f, "{group}")?;
        }
        f.write_str(")")
    }
}

impl PartialEq for QueryGroup {
    fn eq(&self, other: &Self) -> bool {
        self.hash_code() == other.hash_code()
    }
}

impl Eq for QueryGroup {}

impl Hash for QueryGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}
