mod as_value;
mod field;
mod operation;
mod parameter;
mod query_field;
mod query_group;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use field::*;
pub use operation::*;
pub use parameter::*;
pub use query_field::*;
pub use query_group::*;
pub use util::*;
pub use value::*;
pub use writer::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
