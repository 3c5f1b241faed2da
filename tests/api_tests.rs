use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use readshelf::config::Config;
use tower::ServiceExt;

async fn spawn_app(registration_enabled: bool) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.registration_enabled = registration_enabled;

    let state = readshelf::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    readshelf::api::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn register_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/user")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
}

#[tokio::test]
async fn test_registration_disabled() {
    let app = spawn_app(false).await;

    let response = app
        .oneshot(register_request(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_then_fetch_current_user() {
    let app = spawn_app(true).await;

    let response = app
        .clone()
        .oneshot(register_request(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "name": "Alice"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let data = &created["data"];
    assert_eq!(data["username"], "alice");
    assert_eq!(data["name"], "Alice");
    assert!(data["id"].is_number());
    assert!(data["created_at"].is_string());
    assert_eq!(data["default_client"]["name"], "Default client");

    let secret = data["default_client"]["client_secret"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/user")
                .header("Authorization", format!("Bearer {secret}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let current = body_json(response).await;
    assert_eq!(current["data"]["username"], "alice");
    assert_eq!(current["data"]["email"], "alice@example.com");
    assert!(current["data"].get("default_client").is_none());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/user?format=xml")
                .header("X-Api-Key", secret.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(body.to_vec()).unwrap();
    assert!(xml.starts_with("<user>"));
    assert!(xml.contains("<username>alice</username>"));
}

#[tokio::test]
async fn test_current_user_requires_credentials() {
    let app = spawn_app(true).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/user").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user")
                .header("X-Api-Key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_conflicts_and_validation() {
    let app = spawn_app(true).await;

    let response = app
        .clone()
        .oneshot(register_request(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(register_request(serde_json::json!({
            "username": "alice",
            "email": "another@example.com"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(register_request(serde_json::json!({
            "username": "bob",
            "email": "alice@example.com"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(register_request(serde_json::json!({
            "username": "bob",
            "email": "not-an-email"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}
