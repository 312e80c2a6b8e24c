//! Customer CRUD handlers: list, create, update, delete.

use crate::error::AppError;
use crate::model::Customer;
use crate::response::{message, CUSTOMER_CREATED, CUSTOMER_REMOVED, CUSTOMER_UPDATED};
use crate::service::{CustomerSchema, ValidationFailure};
use crate::state::AppState;
use crate::store;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Ids are integers; anything else names no customer.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| store::not_found())
}

/// Unreadable JSON is reported like any other invalid body.
fn read_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationFailure> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ValidationFailure::schema(rejection.body_text()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.store.list().await?;
    Ok(Json(customers))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = read_body(payload)?;
    let new_customer = CustomerSchema::load(&body)?;
    let customer = state.store.create(new_customer).await?;
    tracing::info!(customer_id = customer.customer_id, "customer created");
    Ok(message(StatusCode::CREATED, CUSTOMER_CREATED))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = read_body(payload).and_then(|body| CustomerSchema::load_partial(&body));
    state.store.update(id, patch).await?;
    tracing::info!(customer_id = id, "customer updated");
    Ok(message(StatusCode::OK, CUSTOMER_UPDATED))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete(id).await?;
    tracing::info!(customer_id = id, "customer removed");
    Ok(message(StatusCode::OK, CUSTOMER_REMOVED))
}
