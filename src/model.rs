//! Record types for the five tables and the customer write payloads.
//!
//! Only `Customer` has request handlers; the other records describe rows that exist in the schema.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A table-backed record: table name plus the DDL that creates it.
pub trait Record {
    const TABLE: &'static str;
    const DDL: &'static str;
}

/// A record addressed by a single generated id column.
pub trait Keyed: Record {
    const PRIMARY_KEY: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Customer {
    /// Overwrite only the fields present in the patch.
    pub fn apply(&mut self, patch: &CustomerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
    }
}

impl Keyed for Customer {
    const PRIMARY_KEY: &'static str = "customer_id";
}

impl Record for Customer {
    const TABLE: &'static str = "customers";
    const DDL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS "customers" (
            "customer_id" BIGSERIAL PRIMARY KEY,
            "name" VARCHAR(255) NOT NULL,
            "email" VARCHAR(320) NOT NULL,
            "phone" VARCHAR(15)
        )
    "#;
}

/// Validated create payload; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Validated update payload. `None` leaves a field unchanged; `phone: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Present fields as (column, value) pairs, in a fixed order.
    pub fn columns(&self) -> Vec<(&'static str, Option<&str>)> {
        let mut cols = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            cols.push(("name", Some(name.as_str())));
        }
        if let Some(email) = &self.email {
            cols.push(("email", Some(email.as_str())));
        }
        if let Some(phone) = &self.phone {
            cols.push(("phone", phone.as_deref()));
        }
        cols
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CustomerAccount {
    pub account_id: i64,
    pub username: String,
    /// Stored as opaque text; never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub customer_id: i64,
}

impl Keyed for CustomerAccount {
    const PRIMARY_KEY: &'static str = "account_id";
}

impl Record for CustomerAccount {
    const TABLE: &'static str = "customer_accounts";
    const DDL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS "customer_accounts" (
            "account_id" BIGSERIAL PRIMARY KEY,
            "username" VARCHAR(255) NOT NULL UNIQUE,
            "password" VARCHAR(255) NOT NULL,
            "customer_id" BIGINT NOT NULL UNIQUE
                REFERENCES "customers" ("customer_id") ON DELETE RESTRICT
        )
    "#;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Order {
    pub order_id: i64,
    pub date: NaiveDate,
    pub customer_id: i64,
}

impl Keyed for Order {
    const PRIMARY_KEY: &'static str = "order_id";
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    const DDL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS "orders" (
            "order_id" BIGSERIAL PRIMARY KEY,
            "date" DATE NOT NULL,
            "customer_id" BIGINT NOT NULL
                REFERENCES "customers" ("customer_id") ON DELETE RESTRICT
        )
    "#;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
}

impl Keyed for Product {
    const PRIMARY_KEY: &'static str = "product_id";
}

impl Record for Product {
    const TABLE: &'static str = "products";
    const DDL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS "products" (
            "product_id" BIGSERIAL PRIMARY KEY,
            "name" VARCHAR(255) NOT NULL,
            "price" NUMERIC(12, 2) NOT NULL CHECK ("price" >= 0)
        )
    "#;
}

/// Order-product association; the pair is the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderProduct {
    pub order_id: i64,
    pub product_id: i64,
}

impl Record for OrderProduct {
    const TABLE: &'static str = "order_product";
    const DDL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS "order_product" (
            "order_id" BIGINT NOT NULL
                REFERENCES "orders" ("order_id") ON DELETE RESTRICT,
            "product_id" BIGINT NOT NULL
                REFERENCES "products" ("product_id") ON DELETE RESTRICT,
            PRIMARY KEY ("order_id", "product_id")
        )
    "#;
}
