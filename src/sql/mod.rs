//! Safe SQL builder: identifiers from record definitions only, values as parameters.

mod builder;
pub use builder::*;
