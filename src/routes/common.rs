//! Banner and operational routes.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html, routing::get, Json, Router};
use serde::Serialize;

pub const BANNER: &str = "<h1>This a tasty api (ヘ･_･)ヘ┳━┳  (╯°□°）╯︵ ┻━┻</h1>";

/// Body shared by `/health` and `/ready`; `database` is only reported by readiness.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl ServiceStatus {
    const UP: ServiceStatus = ServiceStatus {
        status: "ok",
        database: None,
    };

    fn from_ping(ping: Result<(), AppError>) -> (StatusCode, Json<ServiceStatus>) {
        match ping {
            Ok(()) => (
                StatusCode::OK,
                Json(ServiceStatus {
                    status: "ok",
                    database: Some("ok"),
                }),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ServiceStatus {
                        status: "degraded",
                        database: Some("unavailable"),
                    }),
                )
            }
        }
    }
}

#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
}

/// GET /, /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Html(BANNER) }))
        .route("/health", get(|| async { Json(ServiceStatus::UP) }))
        .route(
            "/ready",
            get(|State(state): State<AppState>| async move { ServiceStatus::from_ping(state.store.ping().await) }),
        )
        .route(
            "/version",
            get(|| async {
                Json(Build {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                })
            }),
        )
        .with_state(state)
}
