//! E-commerce API: customer CRUD over PostgreSQL, plus the schema for accounts, orders, and products.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{Customer, CustomerAccount, CustomerPatch, Keyed, NewCustomer, Order, OrderProduct, Product, Record};
pub use routes::{app, common_routes, customer_routes};
pub use schema::{drop_tables, ensure_database_exists, ensure_tables};
pub use service::{CustomerSchema, ValidationFailure};
pub use state::AppState;
pub use store::{CustomerStore, InMemoryCustomerStore, PgCustomerStore};
