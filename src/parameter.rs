use crate::{AsValue, Result, Value};
use std::{
    fmt::{self, Display, Formatter},
    hash::{DefaultHasher, Hash, Hasher},
};

/// A named value holder bound to the field of a query predicate.
///
/// The value is fixed once constructed; only the name may be rewritten, to
/// avoid collisions when the same column participates in several predicates
/// of one statement (a SET list and a WHERE clause of the same UPDATE).
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_prepend(name, value, false)
    }

    pub(crate) fn with_prepend(
        name: impl Into<String>,
        value: impl Into<Value>,
        prepend_underscore: bool,
    ) -> Self {
        let mut name = name.into();
        if prepend_underscore {
            name.insert(0, '_');
        }
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Extract the bound value as a native type.
    pub fn get<T: AsValue>(&self) -> Result<T> {
        T::try_from_value(self.value.clone())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Prefix the name with an underscore. Not idempotent: every call adds
    /// another prefix.
    pub fn prepend_underscore(&mut self) {
        self.name.insert(0, '_');
    }

    /// Name-only hash: the bound value never participates in predicate
    /// identity (two same-shaped IN filters with different elements are
    /// deliberately treated as one).
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        hasher.finish()
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.hash_code() == other.hash_code()
    }
}

impl Eq for Parameter {}
