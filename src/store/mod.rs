//! Customer persistence behind one async trait.

mod memory;
mod postgres;

pub use memory::InMemoryCustomerStore;
pub use postgres::PgCustomerStore;

use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer};
use crate::service::ValidationFailure;
use async_trait::async_trait;

/// Each operation runs as one unit of work: either every write becomes visible or none does.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, in storage order.
    async fn list(&self) -> Result<Vec<Customer>, AppError>;

    /// Insert with a storage-generated id.
    async fn create(&self, customer: NewCustomer) -> Result<Customer, AppError>;

    /// Look up `id`, then apply the patch.
    ///
    /// `patch` is the validation outcome of the request body. It is only consulted once the
    /// row is known to exist: an unknown id is `NotFound` even when the body is invalid.
    async fn update(
        &self,
        id: i64,
        patch: Result<CustomerPatch, ValidationFailure>,
    ) -> Result<Customer, AppError>;

    /// Remove `id`. `NotFound` if absent, `Conflict` if other rows still reference it.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Cheap liveness check used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn not_found() -> AppError {
    AppError::NotFound(crate::response::CUSTOMER_NOT_FOUND.into())
}
