use std::{
    fmt::{self, Display, Formatter},
    hash::{DefaultHasher, Hash, Hasher},
};

/// A named column reference, the leaf of every query predicate.
///
/// Equality is exact-match on the name; case normalization (if any) is a
/// dialect concern handled by the writers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Contribution of this field to a combined predicate hash.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        hasher.finish()
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::new(value)
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::new(value)
    }
}

impl From<&Field> for Field {
    fn from(value: &Field) -> Self {
        value.clone()
    }
}
