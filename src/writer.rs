use crate::{Operation, QueryField, QueryGroup, Value, separated_by};
use std::fmt::Write;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $out:ident, $value:expr) => {{
        if $value.is_infinite() {
            $this.write_value_infinity($out, $value.is_sign_negative());
        } else if $value.is_nan() {
            $this.write_value_nan($out);
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Dialect printer converting predicates into concrete SQL fragments.
///
/// Default methods render generic ANSI SQL; dialects override the pieces
/// that differ (identifier quoting, parameter placeholders, literals).
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    /// Named parameter placeholder (`@Name`); dialects using `?` or `$n`
    /// override this.
    fn write_parameter(&self, out: &mut String, name: &str) {
        out.push('@');
        out.push_str(name);
    }

    /// Render a concrete value (including proper quoting / escaping).
    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => self.write_value_none(out),
            Value::Boolean(Some(v)) => self.write_value_bool(out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::Int128(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::UInt128(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, out, *v),
            Value::Float64(Some(v)) => write_float!(self, out, *v),
            Value::Decimal(Some(v), ..) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v)) => self.write_value_string(out, v),
            Value::Blob(Some(v)) => self.write_value_blob(out, v.as_ref()),
            Value::Date(Some(v)) => self.write_value_date(out, v, false),
            Value::Time(Some(v)) => self.write_value_time(out, v, false),
            Value::Timestamp(Some(v)) => self.write_value_timestamp(out, v),
            Value::TimestampWithTimezone(Some(v)) => self.write_value_timestamptz(out, v),
            Value::Uuid(Some(v)) => drop(write!(out, "'{}'", v)),
            Value::List(Some(v), ..) => {
                out.push('(');
                separated_by(out, v, |out, v| self.write_value(out, v), ", ");
                out.push(')');
            }
            _ => {
                log::error!("Cannot write {:?}", value);
            }
        };
    }

    /// Render NULL literal.
    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL");
    }

    /// Render boolean literal.
    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize]);
    }

    /// Render +/- INF via CAST for dialect portability.
    fn write_value_infinity(&self, out: &mut String, negative: bool) {
        out.push_str(if negative {
            "CAST('-inf' AS DOUBLE)"
        } else {
            "CAST('inf' AS DOUBLE)"
        });
    }

    /// Render NaN via CAST for dialect portability.
    fn write_value_nan(&self, out: &mut String) {
        out.push_str("CAST('NaN' AS DOUBLE)");
    }

    /// Render and escape a string literal using single quotes.
    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a blob literal using hex escapes.
    fn write_value_blob(&self, out: &mut String, value: &[u8]) {
        out.push('\'');
        for b in value {
            let _ = write!(out, "\\x{:X}", b);
        }
        out.push('\'');
    }

    /// Render a DATE literal (optionally as part of TIMESTAMP composition).
    fn write_value_date(&self, out: &mut String, value: &Date, timestamp: bool) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:04}-{:02}-{:02}{b}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    /// Render a TIME literal (optionally as part of TIMESTAMP composition).
    fn write_value_time(&self, out: &mut String, value: &Time, timestamp: bool) {
        let mut subsecond = value.nanosecond();
        let mut width = 9;
        while width > 1 && subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:02}:{:02}:{:02}.{:0width$}{b}",
            value.hour(),
            value.minute(),
            value.second(),
            subsecond
        );
    }

    /// Render a TIMESTAMP literal.
    fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        out.push('\'');
        self.write_value_date(out, &value.date(), true);
        out.push('T');
        self.write_value_time(out, &value.time(), true);
        out.push('\'');
    }

    /// Render a TIMESTAMPTZ literal.
    fn write_value_timestamptz(&self, out: &mut String, value: &OffsetDateTime) {
        let date_time = value.to_utc();
        self.write_value_timestamp(out, &PrimitiveDateTime::new(date_time.date(), date_time.time()));
    }

    /// Render the operation-aware fragment of a single predicate, e.g.
    /// `"Age" >= @Age`. NULL-valued equality collapses to `IS NULL` /
    /// `IS NOT NULL`; IN-style and BETWEEN-style predicates enumerate their
    /// placeholders off the bound parameter name.
    fn write_query_field(&self, out: &mut String, value: &QueryField) {
        self.write_identifier_quoted(out, value.field().name());
        let parameter = value.parameter();
        match value.operation() {
            Operation::Equal if parameter.value().is_null() => out.push_str(" IS NULL"),
            Operation::NotEqual if parameter.value().is_null() => out.push_str(" IS NOT NULL"),
            Operation::In | Operation::NotIn => {
                let _ = write!(out, " {} (", value.operation_text());
                let count = parameter.value().count().unwrap_or(0);
                separated_by(
                    out,
                    0..count,
                    |out, i| self.write_parameter(out, &format!("{}_In_{}", parameter.name(), i)),
                    ", ",
                );
                out.push(')');
            }
            Operation::Between | Operation::NotBetween => {
                let _ = write!(out, " {} ", value.operation_text());
                self.write_parameter(out, &format!("{}_Left", parameter.name()));
                out.push_str(" AND ");
                self.write_parameter(out, &format!("{}_Right", parameter.name()));
            }
            _ => {
                let _ = write!(out, " {} ", value.operation_text());
                self.write_parameter(out, parameter.name());
            }
        }
    }

    /// Render a parenthesized conjunction of the group's predicates. Empty
    /// groups produce no output.
    fn write_query_group(&self, out: &mut String, value: &QueryGroup) {
        if value.is_empty() {
            return;
        }
        let separator = format!(" {} ", value.conjunction().as_sql());
        let start = out.len();
        out.push('(');
        let mut len = out.len();
        for field in value.query_fields() {
            if out.len() > len {
                out.push_str(&separator);
            }
            len = out.len();
            self.write_query_field(out, field);
        }
        for group in value.query_groups() {
            if group.is_empty() {
                continue;
            }
            if out.len() > len {
                out.push_str(&separator);
            }
            len = out.len();
            self.write_query_group(out, group);
        }
        out.push(')');
        log::trace!("Rendered group fragment: {}", &out[start..]);
    }
}

/// ANSI writer with no dialect overrides.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
