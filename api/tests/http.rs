use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use forkcast_api::{
    application::http::server::http_server,
    args::{Args, LlmArgs, ServerArgs},
};
use serde_json::{Value, json};

// The router installs a global Prometheus recorder, which can only happen
// once per process, so all tests share a single router instance.
static ROUTER: OnceLock<Router> = OnceLock::new();

fn test_server() -> TestServer {
    let router = ROUTER.get_or_init(build_router).clone();
    TestServer::new(router).expect("test server should start")
}

fn build_router() -> Router {
    let args = Arc::new(Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            root_path: String::new(),
        },
        llm: LlmArgs {
            gemini_api_key: "test-key".to_string(),
            primary_model: "gemini-1.5-pro".to_string(),
            fallback_model: "gemini-1.5-flash".to_string(),
            request_timeout_secs: 5,
            label_font_path: None,
        },
    });
    let state = http_server::state(args).expect("state should build");
    http_server::router(state).expect("router should build")
}

#[tokio::test]
async fn root_reports_identity() {
    let server = test_server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("Forkcast"));
}

#[tokio::test]
async fn health_endpoint_is_live() {
    let server = test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn analyze_image_requires_the_image_field() {
    let server = test_server();
    let body = "--BOUNDARY\r\n\
        Content-Disposition: form-data; name=\"prompt\"\r\n\r\n\
        only a prompt\r\n\
        --BOUNDARY--\r\n";
    let response = server
        .post("/analyze-image")
        .content_type("multipart/form-data; boundary=BOUNDARY")
        .bytes(Bytes::from(body.as_bytes().to_vec()))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().contains("image"));
}

#[tokio::test]
async fn generate_recipe_rejects_a_malformed_body() {
    let server = test_server();
    let response = server
        .post("/generate-recipe")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"this is not json"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_recipe_enforces_the_ingredient_cap() {
    let server = test_server();
    let ingredients: Vec<String> = (0..101).map(|i| format!("ingredient-{i}")).collect();
    let response = server
        .post("/generate-recipe")
        .json(&json!({ "ingredients": ingredients }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
