//! Response body helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const CUSTOMER_CREATED: &str = "New Customer successfully added!";
pub const CUSTOMER_UPDATED: &str = "Customer details updated successfully";
pub const CUSTOMER_REMOVED: &str = "Customer removed successfully!";
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";
pub const CUSTOMER_HAS_DEPENDENTS: &str = "Customer still has accounts or orders";

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        MessageBody {
            message: message.into(),
        }
    }
}

pub fn message(status: StatusCode, message: &str) -> (StatusCode, Json<MessageBody>) {
    (status, Json(MessageBody::new(message)))
}
