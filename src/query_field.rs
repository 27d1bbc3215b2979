use crate::{Field, Operation, Parameter, Value};
use std::{
    cell::Cell,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

const HASHCODE_IS_NULL: u64 = 128;
const HASHCODE_IS_NOT_NULL: u64 = 256;

/// A single query predicate: a field, the comparison operation and the bound
/// parameter, e.g. `Age >= @Age`.
///
/// Identity is the memoized combined hash, not a structural comparison: two
/// predicates are equal exactly when their hash codes match. Downstream
/// deduplication depends on this policy, collisions are accepted as rare.
///
/// The memo cells are `Cell`-based, so the type is `!Sync`: an instance is
/// built, possibly rewritten and read within one statement-building pass.
#[derive(Debug, Clone)]
pub struct QueryField {
    field: Field,
    operation: Operation,
    parameter: Parameter,
    hash: Cell<Option<u64>>,
    operation_text: Cell<Option<&'static str>>,
}

impl QueryField {
    pub fn new(
        field: impl Into<Field>,
        operation: Operation,
        value: impl Into<Value>,
    ) -> Self {
        Self::with_prepended_parameter(field, operation, value, false)
    }

    /// Predicate with the default `Equal` operation.
    pub fn equal(field: impl Into<Field>, value: impl Into<Value>) -> Self {
        Self::new(field, Operation::Equal, value)
    }

    /// Construction path that can seed the parameter name as `_{field}`,
    /// used when the same field appears in both the SET list and the WHERE
    /// clause of an UPDATE.
    pub(crate) fn with_prepended_parameter(
        field: impl Into<Field>,
        operation: Operation,
        value: impl Into<Value>,
        prepend_underscore: bool,
    ) -> Self {
        let field = field.into();
        let parameter = Parameter::with_prepend(field.name(), value, prepend_underscore);
        Self {
            field,
            operation,
            parameter,
            hash: Cell::new(None),
            operation_text: Cell::new(None),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub(crate) fn parameter_mut(&mut self) -> &mut Parameter {
        &mut self.parameter
    }

    pub(crate) fn prepend_underscore_at_parameter(&mut self) {
        self.parameter.prepend_underscore();
    }

    /// Rewrite the bound parameter name for UPDATE statements where the same
    /// column is both assigned and filtered against. Not idempotent: calling
    /// twice prefixes twice, at most one call per statement-building pass.
    pub fn mark_for_update(&mut self) {
        self.prepend_underscore_at_parameter();
    }

    /// Restore the pristine state: the parameter is named exactly after the
    /// field again and both memo cells are cleared together.
    pub fn reset(&mut self) {
        let name = self.field.name().to_owned();
        self.parameter.set_name(name);
        self.operation_text.set(None);
        self.hash.set(None);
    }

    /// Memoized SQL token of this predicate's operation.
    pub fn operation_text(&self) -> &'static str {
        if let Some(text) = self.operation_text.get() {
            return text;
        }
        let text = self.operation.as_sql();
        self.operation_text.set(Some(text));
        text
    }

    /// The tuple consumed by statement builders:
    /// `(field name, operation token, parameter name, value)`.
    pub fn predicate_parts(&self) -> (&str, &'static str, &str, &Value) {
        (
            self.field.name(),
            self.operation_text(),
            self.parameter.name(),
            self.parameter.value(),
        )
    }

    /// Memoized combined hash.
    ///
    /// Base is field hash + operation ordinal + parameter (name) hash, with
    /// three value-sensitive adjustments: `Equal`/`NotEqual` against a NULL
    /// value render to different SQL (`IS NULL` / `IS NOT NULL`) and must
    /// never collide with the parameterized form, and IN-style predicates
    /// with different element counts must stay distinct.
    pub fn hash_code(&self) -> u64 {
        if let Some(hash) = self.hash.get() {
            return hash;
        }
        let mut hash = self
            .field
            .hash_code()
            .wrapping_add(self.operation.ordinal())
            .wrapping_add(self.parameter.hash_code());
        let value = self.parameter.value();
        if self.operation == Operation::Equal && value.is_null() {
            hash = hash.wrapping_add(HASHCODE_IS_NULL);
        } else if self.operation == Operation::NotEqual && value.is_null() {
            hash = hash.wrapping_add(HASHCODE_IS_NOT_NULL);
        } else if matches!(self.operation, Operation::In | Operation::NotIn) {
            if let Some(count) = value.count() {
                hash = hash.wrapping_add(count as u64);
            }
        }
        self.hash.set(Some(hash));
        hash
    }
}

impl Display for QueryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.parameter)
    }
}

impl PartialEq for QueryField {
    fn eq(&self, other: &Self) -> bool {
        self.hash_code() == other.hash_code()
    }
}

impl Eq for QueryField {}

impl Hash for QueryField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}
