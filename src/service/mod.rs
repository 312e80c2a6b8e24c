//! Request validation for the customer resource.

mod validation;
pub use validation::{CustomerSchema, ValidationFailure};
