//! In-memory customer store for tests and local development.

use super::{not_found, CustomerStore};
use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer};
use crate::service::ValidationFailure;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Customer>,
    last_id: i64,
}

/// Holding the mutex for a whole operation gives each one the same all-or-nothing behavior as a transaction.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    table: Mutex<Table>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let row = Customer {
            customer_id: table.last_id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        };
        table.rows.insert(row.customer_id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: Result<CustomerPatch, ValidationFailure>,
    ) -> Result<Customer, AppError> {
        let mut table = self.table.lock().await;
        let row = table.rows.get_mut(&id).ok_or_else(not_found)?;
        row.apply(&patch?);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.table
            .lock()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(not_found)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
