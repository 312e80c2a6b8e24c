//! HTTP handlers for the customer resource.

pub mod customer;
