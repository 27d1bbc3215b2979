use std::fmt::{self, Display, Formatter};

/// The comparison applied by a query predicate.
///
/// Every variant carries a fixed SQL operator token, see [`Operation::as_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
    All,
    Any,
}

impl Operation {
    pub const VARIANTS: [Operation; 14] = [
        Operation::Equal,
        Operation::NotEqual,
        Operation::LessThan,
        Operation::GreaterThan,
        Operation::LessThanOrEqual,
        Operation::GreaterThanOrEqual,
        Operation::Like,
        Operation::NotLike,
        Operation::Between,
        Operation::NotBetween,
        Operation::In,
        Operation::NotIn,
        Operation::All,
        Operation::Any,
    ];

    /// The literal SQL token of the operation.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Operation::Equal => "=",
            Operation::NotEqual => "<>",
            Operation::LessThan => "<",
            Operation::GreaterThan => ">",
            Operation::LessThanOrEqual => "<=",
            Operation::GreaterThanOrEqual => ">=",
            Operation::Like => "LIKE",
            Operation::NotLike => "NOT LIKE",
            Operation::Between => "BETWEEN",
            Operation::NotBetween => "NOT BETWEEN",
            Operation::In => "IN",
            Operation::NotIn => "NOT IN",
            Operation::All => "AND",
            Operation::Any => "OR",
        }
    }

    /// Stable position of the variant, part of the combined predicate hash.
    pub const fn ordinal(&self) -> u64 {
        *self as u64
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Equal => "Equal",
            Operation::NotEqual => "NotEqual",
            Operation::LessThan => "LessThan",
            Operation::GreaterThan => "GreaterThan",
            Operation::LessThanOrEqual => "LessThanOrEqual",
            Operation::GreaterThanOrEqual => "GreaterThanOrEqual",
            Operation::Like => "Like",
            Operation::NotLike => "NotLike",
            Operation::Between => "Between",
            Operation::NotBetween => "NotBetween",
            Operation::In => "In",
            Operation::NotIn => "NotIn",
            Operation::All => "All",
            Operation::Any => "Any",
        })
    }
}
