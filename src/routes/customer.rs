//! Customer CRUD routes. The id segment is parsed by the handlers so a non-integer id is a 404.

use crate::handlers::customer::{create, delete as delete_handler, list, update};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(list).post(create))
        .route("/customers/:id", put(update).delete(delete_handler))
        .with_state(state)
}
