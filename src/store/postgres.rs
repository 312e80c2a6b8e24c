//! PostgreSQL customer store: one transaction per operation.

use super::{not_found, CustomerStore};
use crate::error::AppError;
use crate::model::{Customer, CustomerPatch, NewCustomer};
use crate::response::CUSTOMER_HAS_DEPENDENTS;
use crate::service::ValidationFailure;
use crate::sql;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

const COLUMNS: &[&str] = &["customer_id", "name", "email", "phone"];

/// SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        PgCustomerStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find(conn: &mut PgConnection, id: i64) -> Result<Option<Customer>, AppError> {
        let q = sql::select_by_id::<Customer>(COLUMNS);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query_as::<_, Customer>(&q)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .is_some_and(|code| code == FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let q = sql::select_all::<Customer>(COLUMNS);
        tracing::debug!(sql = %q, "query");
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, Customer>(&q).fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn create(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let q = sql::insert::<Customer>(&["name", "email", "phone"], COLUMNS);
        tracing::debug!(sql = %q, "query");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Customer>(&q)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: Result<CustomerPatch, ValidationFailure>,
    ) -> Result<Customer, AppError> {
        let mut tx = self.pool.begin().await?;
        let existing = Self::find(&mut tx, id).await?.ok_or_else(not_found)?;
        // Dropping `tx` on any early return rolls it back.
        let patch = patch?;
        let columns = patch.columns();
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let Some(q) = sql::update::<Customer>(&names, COLUMNS) else {
            tx.commit().await?;
            return Ok(existing);
        };
        tracing::debug!(sql = %q, id, "query");
        let mut query = sqlx::query_as::<_, Customer>(&q);
        for (_, value) in &columns {
            query = query.bind(*value);
        }
        let row = query.bind(id).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        Self::find(&mut tx, id).await?.ok_or_else(not_found)?;
        let q = sql::delete::<Customer>();
        tracing::debug!(sql = %q, id, "query");
        sqlx::query(&q)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(CUSTOMER_HAS_DEPENDENTS.into())
                } else {
                    AppError::Db(e)
                }
            })?;
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
