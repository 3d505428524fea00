use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use impro_api::config::{PaymentConfig, ServerConfig};
use impro_api::router::build_app_router;
use impro_api::state::AppState;

/// Shared payment secret used to sign and verify test payloads.
pub const TEST_PRIVATE_KEY: &str = "sandbox_private_key";
pub const TEST_PUBLIC_KEY: &str = "sandbox_public_key";

/// Flat course price configured in [`test_config`]. Stored course prices in
/// the fixtures differ, so tests can observe the override.
pub const TEST_COURSE_FLAT_PRICE: f64 = 2500.0;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        payment: PaymentConfig {
            public_key: TEST_PUBLIC_KEY.to_string(),
            private_key: TEST_PRIVATE_KEY.to_string(),
            checkout_url: "https://checkout.test/api/3/checkout".to_string(),
            result_url: "https://school.test/payment-result".to_string(),
            callback_url: "https://school.test/api/v1/payments/callback".to_string(),
            currency: "UAH".to_string(),
            course_flat_price: Some(TEST_COURSE_FLAT_PRICE),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a form-urlencoded body.
pub async fn post_form(app: Router, uri: &str, body: String) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Percent-encode a base64 value for a form-urlencoded body. Base64 output
/// only contains `+`, `/`, and `=` beyond unreserved characters.
pub fn form_encode_b64(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('/', "%2F")
        .replace('=', "%3D")
}

/// Build the callback request body the processor would send.
pub fn callback_body(data: &str, signature: &str) -> String {
    format!(
        "data={}&signature={}",
        form_encode_b64(data),
        form_encode_b64(signature)
    )
}
