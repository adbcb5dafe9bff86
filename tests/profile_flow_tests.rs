use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use careerpilot::test_utils::test_helpers::{build_test_app, TestAppConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let (app, _pool) = build_test_app(TestAppConfig::default())
        .await
        .expect("test app");
    app
}

fn json_request(method: &str, uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn signup(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "email": email,
                        "password": "password123",
                        "confirmPassword": "password123",
                    })
                    .to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::CREATED);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn saving_a_profile_returns_the_stored_row() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "experience": "3 years at Acme", "skills": "Rust, SQL" }),
        ))
        .await
        .expect("put profile");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["profile"]["experience"], "3 years at Acme");
    assert_eq!(body["data"]["profile"]["skills"], "Rust, SQL");
    assert_eq!(body["data"]["profile"]["education"], Value::Null);
}

#[tokio::test]
async fn partial_updates_keep_the_other_fields() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "experience": "3 years at Acme" }),
        ))
        .await
        .expect("first put");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "skills": "Rust" }),
        ))
        .await
        .expect("second put");
    let body = body_json(response).await;
    assert_eq!(body["data"]["profile"]["experience"], "3 years at Acme");
    assert_eq!(body["data"]["profile"]["skills"], "Rust");
}

#[tokio::test]
async fn the_overview_masks_the_password_and_scores_completeness() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "experience": "3 years at Acme", "education": "BSc" }),
        ))
        .await
        .expect("put profile");

    let response = app
        .oneshot(get_request("/profile", &cookie))
        .await
        .expect("get profile");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["user"]["email"], "dev@example.com");
    assert_eq!(data["user"]["passwordHash"], "••••••••••••");
    assert_eq!(data["stats"]["profileCompleteness"], 50);
    assert_eq!(data["stats"]["draftCount"], 0);
    assert_eq!(data["stats"]["jobCount"], 0);
    assert_eq!(data["profile"]["experience"], "3 years at Acme");
}

#[tokio::test]
async fn an_empty_update_is_rejected() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    let response = app
        .oneshot(json_request("PUT", "/profile", &cookie, json!({})))
        .await
        .expect("put profile");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn an_oversized_field_is_rejected() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "skills": "x".repeat(501) }),
        ))
        .await
        .expect("put profile");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn deleting_the_profile_is_idempotent() {
    let app = test_app().await;
    let cookie = signup(&app, "dev@example.com").await;

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/profile",
            &cookie,
            json!({ "experience": "3 years at Acme" }),
        ))
        .await
        .expect("put profile");

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/profile")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("first delete");
    assert_eq!(first.status(), StatusCode::OK);
    let body = body_json(first).await;
    assert_eq!(body["data"]["message"], "Profile deleted");

    let second = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/profile")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("second delete");
    assert_eq!(second.status(), StatusCode::OK);
    let body = body_json(second).await;
    assert_eq!(body["data"]["message"], "No profile to delete");

    // The user account survives the profile deletion
    let response = app
        .oneshot(get_request("/profile", &cookie))
        .await
        .expect("get profile");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["profile"], Value::Null);
    assert_eq!(body["data"]["stats"]["profileCompleteness"], 0);
}
