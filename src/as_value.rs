use crate::{Error, Result, Value};
use rust_decimal::Decimal;
use std::any;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// representation that backs query parameters.
///
/// `as_empty_value` returns the typed NULL for the implementing type, used
/// as the element prototype of composite values (lists). `try_from_value`
/// accepts the canonical variant and, for integers, alternate widths with a
/// range check.
pub trait AsValue {
    /// The NULL-like value variant for this type.
    fn as_empty_value() -> Value;
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} into {}",
        value,
        any::type_name::<T>()
    ))
}

fn narrow<S, D>(v: S) -> Result<D>
where
    S: std::fmt::Display + Copy,
    D: TryFrom<S>,
{
    D::try_from(v).map_err(|_| {
        Error::msg(format!(
            "Value {} is out of range for {}",
            v,
            any::type_name::<D>()
        ))
    })
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v),
                    #[allow(unreachable_patterns)]
                    Value::Int8(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::Int16(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::Int32(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::Int64(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::Int128(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt8(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt16(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt32(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt64(Some(v)) => narrow(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt128(Some(v)) => narrow(v),
                    v => Err(mismatch::<Self>(&v)),
                }
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(i128, Value::Int128);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);
impl_as_value_integer!(u128, Value::UInt128);

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v),
                    $($pat_rest => $expr_rest,)*
                    v => Err(mismatch::<Self>(&v)),
                }
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::Int128(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt16(Some(v)) => Ok(v != 0),
    Value::UInt32(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
    Value::UInt128(Some(v)) => Ok(v != 0),
);
impl_as_value!(f32, Value::Float32);
impl_as_value!(f64, Value::Float64,
    Value::Float32(Some(v)) => Ok(v as f64),
);
impl_as_value!(String, Value::Varchar);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Uuid, Value::Uuid);

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None, 0, 0)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self), 0, self.scale() as u8)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            v => Err(mismatch::<Self>(&v)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(Some(v), ..) => v.into_iter().map(T::try_from_value).collect(),
            v => Err(mismatch::<Self>(&v)),
        }
    }
}
