use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use service_cell::router::service_routes;
use shared_database::AppState;
use user_cell::router::user_routes;

pub const GREETING: &str = "Welcome to Doctors Portal server!";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { GREETING }))
        .merge(service_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(user_routes(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use shared_database::memory::MemoryStore;
    use shared_utils::test_utils::TestConfig;

    use super::*;

    fn app() -> Router {
        create_router(TestConfig::default().to_state(Arc::new(MemoryStore::new())))
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_greeting() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], GREETING.as_bytes());
    }

    #[tokio::test]
    async fn test_every_cell_is_mounted() {
        assert_eq!(status_of("GET", "/service").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/available").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/appointment?email=a@example.com").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_of("GET", "/user").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_of("GET", "/admin/a@example.com").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_of("PUT", "/user/admin/a@example.com").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        assert_eq!(status_of("GET", "/doctors").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("GET", "/user/admin/a@example.com/extra").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405_without_auth() {
        assert_eq!(status_of("DELETE", "/appointment").await, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status_of("POST", "/user").await, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status_of("POST", "/service").await, StatusCode::METHOD_NOT_ALLOWED);
    }
}
