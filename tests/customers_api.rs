//! Router tests: drive the full app over the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use ecommerce_api::{app, AppState, InMemoryCustomerStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn test_app() -> Router {
    app(AppState::new(InMemoryCustomerStore::new()), BODY_LIMIT)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().cloned().unwrap()
}

async fn create_ada(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/customers",
        Some(json!({"name": "Ada", "email": "ada@example.com", "phone": "555-0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "New Customer successfully added!"}));
    list(app).await.last().unwrap()["customer_id"].as_i64().unwrap()
}

#[tokio::test]
async fn empty_table_lists_as_empty_array() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_customer_appears_in_list() {
    let app = test_app();
    let id = create_ada(&app).await;
    assert_eq!(
        list(&app).await,
        vec![json!({"customer_id": id, "name": "Ada", "email": "ada@example.com", "phone": "555-0000"})]
    );
}

#[tokio::test]
async fn create_without_required_fields_is_rejected_and_stores_nothing() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/customers", Some(json!({"phone": "555-0100"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["Missing data for required field."],
            "email": ["Missing data for required field."]
        })
    );

    let (status, body) = send(&app, Method::POST, "/customers", Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("email").is_some());
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("_schema").is_some());
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn put_with_only_phone_changes_only_phone() {
    let app = test_app();
    let id = create_ada(&app).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/customers/{}", id),
        Some(json!({"phone": "555-0100"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Customer details updated successfully"}));
    assert_eq!(
        list(&app).await,
        vec![json!({"customer_id": id, "name": "Ada", "email": "ada@example.com", "phone": "555-0100"})]
    );
}

#[tokio::test]
async fn invalid_update_changes_nothing() {
    let app = test_app();
    let id = create_ada(&app).await;
    let before = list(&app).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/customers/{}", id),
        Some(json!({"name": "Grace", "email": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"email": ["Not a valid string."]}));
    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn put_on_unknown_id_is_404_regardless_of_body() {
    let app = test_app();
    for body in [json!({"name": "Ada", "email": "a@b.c"}), json!({"name": 1}), json!([1, 2])] {
        let (status, response) = send(&app, Method::PUT, "/customers/9999999", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response, json!({"message": "Customer not found"}));
    }
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/customers/9999999")
        .body(Body::from("garbage"))
        .unwrap();
    let (status, _) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_customer_then_404s() {
    let app = test_app();
    let id = create_ada(&app).await;
    let uri = format!("/customers/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Customer removed successfully!"}));
    assert!(list(&app).await.iter().all(|c| c["customer_id"] != json!(id)));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let app = test_app();
    let (status, _) = send(&app, Method::DELETE, "/customers/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn banner_and_operational_routes() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().starts_with("<h1>This a tasty api"));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (status, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("ecommerce-api"));
}

#[tokio::test]
async fn body_over_the_limit_is_refused_before_routing() {
    let app = app(AppState::new(InMemoryCustomerStore::new()), 16);
    let body = json!({"name": "Ada Lovelace", "email": "ada@example.com"}).to_string();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/customers/9999999")
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let (status, _) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn numeric_string_customer_id_is_accepted_and_ignored() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/customers",
        Some(json!({"customer_id": "7", "name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list(&app).await[0]["customer_id"], json!(1));
}
