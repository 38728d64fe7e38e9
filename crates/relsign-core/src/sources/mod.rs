//! Input snapshots for signing resolution
//!
//! Both sources are read once, up front, and handed to the resolver as
//! plain values so resolution never touches the process environment or the
//! filesystem for its inputs.

mod env;
mod field;
mod properties;

pub use env::EnvironmentSource;
pub use field::{FieldSource, SigningField};
pub use properties::{PropertySource, SyntaxError};

pub(crate) use field::non_blank;
