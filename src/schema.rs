//! Create the five tables at startup. Order follows foreign-key dependencies.

use crate::error::AppError;
use crate::model::{Customer, CustomerAccount, Order, OrderProduct, Product, Record};
use crate::sql::quoted;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub struct TableDef {
    pub name: &'static str,
    pub ddl: &'static str,
}

const fn table<R: Record>() -> TableDef {
    TableDef {
        name: R::TABLE,
        ddl: R::DDL,
    }
}

/// Referenced tables come before the tables that reference them.
pub const TABLES: &[TableDef] = &[
    table::<Customer>(),
    table::<CustomerAccount>(),
    table::<Order>(),
    table::<Product>(),
    table::<OrderProduct>(),
];

/// CREATE TABLE IF NOT EXISTS for every table. Existing tables and rows are left alone.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for t in TABLES {
        tracing::debug!(table = t.name, "ensure table");
        sqlx::query(t.ddl).execute(pool).await?;
    }
    Ok(())
}

/// Drop every table, dependents first. Destroys all data.
pub async fn drop_tables(pool: &PgPool) -> Result<(), AppError> {
    for t in TABLES.iter().rev() {
        tracing::warn!(table = t.name, "dropping table");
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", quoted(t.name)))
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin_url, db_name)) = split_db_name(database_url) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a URL into (URL pointing at `postgres`, database name). `None` if there is no path.
fn split_db_name(url: &str) -> Option<(String, String)> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..].find('/')? + scheme_end + 1;
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    let query = url[path_start..].find('?').map(|i| &url[path_start + i..]).unwrap_or("");
    let admin_url = format!("{}postgres{}", &url[..path_start], query);
    Some((admin_url, db_name.to_string()))
}
