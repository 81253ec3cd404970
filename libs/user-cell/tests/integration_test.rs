use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_database::memory::MemoryStore;
use shared_database::{Collection, DocumentStore};
use shared_utils::jwt::validate_token;
use shared_utils::test_utils::{json_doc, JwtTestUtils, TestConfig, TestUser};
use user_cell::router::user_routes;

fn create_test_app(store: Arc<MemoryStore>) -> Router {
    user_routes(TestConfig::default().to_state(store))
}

fn bearer(user: &TestUser) -> String {
    let config = TestConfig::default();
    format!("Bearer {}", JwtTestUtils::create_test_token(user, &config.jwt_secret, None))
}

async fn store_with(users: &[TestUser]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(Collection::Users, users.iter().map(TestUser::to_document).collect())
        .await;
    store
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

fn request(method: &str, uri: &str, authorization: Option<String>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_put_user_creates_user_and_returns_token() {
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone());

    let (status, body) = send(
        app,
        request("PUT", "/user/new@example.com", None, Some(json!({ "name": "New Patient" }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(body["result"]["upsertedCount"], 1);
    assert_eq!(body["result"]["matchedCount"], 0);

    let claims = validate_token(token, &TestConfig::default().jwt_secret).unwrap();
    assert_eq!(claims.email, "new@example.com");
    assert_eq!(claims.exp, None);

    let stored = store
        .find_one(Collection::Users, json_doc(json!({ "email": "new@example.com" })))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["name"], "New Patient");
}

#[tokio::test]
async fn test_put_user_updates_existing_user() {
    let store = store_with(&[TestUser::patient("jane@example.com")]).await;

    let (status, body) = send(
        create_test_app(store.clone()),
        request("PUT", "/user/jane@example.com", None, Some(json!({ "name": "Jane" }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["matchedCount"], 1);
    assert_eq!(body["result"]["upsertedId"], Value::Null);
    assert_eq!(store.count(Collection::Users).await, 1);
}

#[tokio::test]
async fn test_put_user_without_json_body_upserts_email_only() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) = send(
        create_test_app(store.clone()),
        request("PUT", "/user/bodyless@example.com", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["result"]["upsertedCount"], 1);

    let stored = store
        .find_one(Collection::Users, json_doc(json!({ "email": "bodyless@example.com" })))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.contains_key("_id"));
}

#[tokio::test]
async fn test_protected_routes_require_header() {
    for (method, uri) in [("GET", "/user"), ("GET", "/admin/a@example.com"), ("PUT", "/user/admin/a@example.com")] {
        let app = create_test_app(Arc::new(MemoryStore::new()));

        let (status, body) = send(app, request(method, uri, None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["message"], "Unauthorize access!");
    }
}

#[tokio::test]
async fn test_protected_routes_reject_mis_signed_token() {
    let authorization = format!(
        "Bearer {}",
        JwtTestUtils::create_invalid_signature_token(&TestUser::admin("admin@example.com"))
    );

    let (status, _) = send(
        create_test_app(store_with(&[TestUser::admin("admin@example.com")]).await),
        request("GET", "/user", Some(authorization), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_applies_filter() {
    let admin = TestUser::admin("admin@example.com");
    let store = store_with(&[
        TestUser::patient("jane@example.com"),
        TestUser::admin("admin@example.com"),
        TestUser::patient("john@example.com"),
    ])
    .await;

    let (status, all) = send(create_test_app(store.clone()), request("GET", "/user", Some(bearer(&admin)), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, admins) = send(
        create_test_app(store),
        request("GET", "/user?role=admin", Some(bearer(&admin)), None),
    )
    .await;
    let admins = admins.as_array().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0]["email"], "admin@example.com");
}

#[tokio::test]
async fn test_admin_check_reflects_stored_role() {
    let caller = TestUser::patient("jane@example.com");
    let store = store_with(&[TestUser::patient("jane@example.com"), TestUser::admin("admin@example.com")]).await;

    let (_, admin) = send(
        create_test_app(store.clone()),
        request("GET", "/admin/admin@example.com", Some(bearer(&caller)), None),
    )
    .await;
    let (_, patient) = send(
        create_test_app(store),
        request("GET", "/admin/jane@example.com", Some(bearer(&caller)), None),
    )
    .await;

    assert_eq!(admin, json!({ "admin": true }));
    assert_eq!(patient, json!({ "admin": false }));
}

#[tokio::test]
async fn test_admin_check_unknown_user_is_not_found() {
    let caller = TestUser::patient("jane@example.com");

    let (status, body) = send(
        create_test_app(store_with(&[]).await),
        request("GET", "/admin/ghost@example.com", Some(bearer(&caller)), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_admin_can_promote_user() {
    let admin = TestUser::admin("admin@example.com");
    let store = store_with(&[TestUser::admin("admin@example.com"), TestUser::patient("jane@example.com")]).await;

    let (status, body) = send(
        create_test_app(store.clone()),
        request("PUT", "/user/admin/jane@example.com", Some(bearer(&admin)), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["modifiedCount"], 1);

    let promoted = store
        .find_one(Collection::Users, json_doc(json!({ "email": "jane@example.com" })))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(promoted["role"], "admin");
}

#[tokio::test]
async fn test_non_admin_cannot_promote() {
    let patient = TestUser::patient("jane@example.com");
    let store = store_with(&[TestUser::patient("jane@example.com"), TestUser::patient("john@example.com")]).await;

    let (status, body) = send(
        create_test_app(store.clone()),
        request("PUT", "/user/admin/john@example.com", Some(bearer(&patient)), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden");

    let john = store
        .find_one(Collection::Users, json_doc(json!({ "email": "john@example.com" })))
        .await
        .unwrap()
        .unwrap();
    assert!(john.get("role").is_none());
}

#[tokio::test]
async fn test_promotion_by_unknown_requester_is_not_found() {
    let ghost = TestUser::admin("ghost@example.com");
    let store = store_with(&[TestUser::patient("jane@example.com")]).await;

    let (status, _) = send(
        create_test_app(store),
        request("PUT", "/user/admin/jane@example.com", Some(bearer(&ghost)), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_promoting_unknown_target_creates_nothing() {
    let admin = TestUser::admin("admin@example.com");
    let store = store_with(&[TestUser::admin("admin@example.com")]).await;

    let (status, body) = send(
        create_test_app(store.clone()),
        request("PUT", "/user/admin/ghost@example.com", Some(bearer(&admin)), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["matchedCount"], 0);
    assert_eq!(store.count(Collection::Users).await, 1);
}
