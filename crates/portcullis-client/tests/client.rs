pub mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::{json_reply, serve, text_reply};
use portcullis_api_types::auth::request::AuthForm;
use portcullis_api_types::auth::response::AuthResponse;
use portcullis_client::{Client, Error};
use serde_json::{json, Value};

fn credentials() -> AuthForm {
    AuthForm {
        username: "george".into(),
        password: "correct horse".into(),
    }
}

#[tokio::test]
async fn login_posts_json_credentials() {
    let router = Router::new().route(
        "/api/login",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let content_type = headers[CONTENT_TYPE].to_str().unwrap().to_owned();
            Json(json!({
                "username": body["username"],
                "token": "t0k3n",
                "status": content_type,
            }))
        }),
    );
    let client = serve(router).await;

    let resp = client.login(&credentials()).await.unwrap();

    assert_eq!(resp.username(), Some("george"));
    assert_eq!(resp.token(), Some("t0k3n"));
    assert_eq!(resp.status, Some(json!("application/json")));
    assert_eq!(resp.message, None);
}

#[tokio::test]
async fn signup_uses_signup_endpoint() {
    let router = Router::new()
        .route("/api/login", post(|| async { Json(json!({"status": "login"})) }))
        .route("/api/signup", post(|| async { Json(json!({"status": "signup"})) }));
    let client = serve(router).await;

    let resp = client.signup(&credentials()).await.unwrap();

    assert_eq!(resp.status, Some(json!("signup")));
}

#[tokio::test]
async fn success_json_is_returned_unchanged() {
    let body = json!({
        "username": "george",
        "token": "abc",
        "roles": ["admin"],
        "expires_in": 3600,
    });
    let reply = body.clone();
    let router = Router::new().route("/api/login", post(move || async move { Json(reply) }));
    let client = serve(router).await;

    let resp = client.login(&credentials()).await.unwrap();
    assert_eq!(serde_json::to_value(&resp).unwrap(), body);

    let raw: Value = client.post_json("/api/login", &credentials()).await.unwrap();
    assert_eq!(raw, body);
}

#[tokio::test]
async fn success_with_non_string_fields_is_returned_unchanged() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { json_reply(StatusCode::OK, r#"{"token":"t","status":200,"message":null}"#) }),
    );
    let client = serve(router).await;

    let resp = client.login(&credentials()).await.unwrap();

    assert_eq!(resp.token(), Some("t"));
    assert_eq!(resp.status, Some(json!(200)));
    assert!(!resp.has_message());
}

#[tokio::test]
async fn success_without_json_is_empty() {
    let router = Router::new()
        .route("/api/login", post(|| async { text_reply(StatusCode::OK, "welcome back") }))
        .route("/api/signup", post(|| async { StatusCode::NO_CONTENT }));
    let client = serve(router).await;

    assert_eq!(client.login(&credentials()).await.unwrap(), AuthResponse::default());
    assert_eq!(client.signup(&credentials()).await.unwrap(), AuthResponse::default());
}

#[tokio::test]
async fn malformed_success_json_is_a_deserialization_error() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { json_reply(StatusCode::OK, "{\"token\": ") }),
    );
    let client = serve(router).await;

    let err = client.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization(_)), "{err:?}");
}

#[tokio::test]
async fn error_json_message_and_body() {
    let router = Router::new().route(
        "/api/signup",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({"message": "User already exists", "status": "error"})),
            )
        }),
    );
    let client = serve(router).await;

    let err = client.signup(&credentials()).await.unwrap_err();
    let Error::Api(api) = &err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(api.status.as_u16(), 409);
    assert_eq!(api.message, "User already exists");
    assert_eq!(
        api.body,
        Some(json!({"message": "User already exists", "status": "error"}))
    );
}

#[tokio::test]
async fn error_json_without_message_falls_back() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad password"}))) }),
    );
    let client = serve(router).await;

    let err = client.login(&credentials()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed (401)");
    assert_eq!(err.body(), Some(&json!({"error": "bad password"})));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn error_plain_text_is_the_message() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { text_reply(StatusCode::BAD_REQUEST, "oops") }),
    );
    let client = serve(router).await;

    let err = client.login(&credentials()).await.unwrap_err();
    assert_eq!(err.message(), "oops");
    assert_eq!(err.body(), None);
}

#[tokio::test]
async fn error_empty_body_falls_back() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let client = serve(router).await;

    let err = client.login(&credentials()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed (503)");
}

#[tokio::test]
async fn error_unparseable_json_falls_back() {
    let router = Router::new().route(
        "/api/login",
        post(|| async { json_reply(StatusCode::INTERNAL_SERVER_ERROR, "<html>nope</html>") }),
    );
    let client = serve(router).await;

    let err = client.login(&credentials()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed (500)");
    assert_eq!(err.body(), None);
}

#[tokio::test]
async fn network_failure_is_passed_through() {
    let client = Client::new(&common::unreachable_endpoint().await);

    let err = client.login(&credentials()).await.unwrap_err();
    let Error::Network(inner) = &err else {
        panic!("expected network error, got {err:?}");
    };
    assert!(inner.is_connect() || inner.is_request(), "{inner:?}");
    assert_eq!(err.body(), None);
}
