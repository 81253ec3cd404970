use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn user_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/user/{email}", put(handlers::upsert_user));

    let protected_routes = Router::new()
        .route("/user", get(handlers::list_users))
        .route("/user/admin/{email}", put(handlers::make_admin))
        .route("/admin/{email}", get(handlers::check_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
