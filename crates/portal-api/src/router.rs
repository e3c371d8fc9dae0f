//! Route table

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{auth, health, menu, navigation, preferences, users};
use crate::middleware::require_session;
use crate::state::AppState;

/// A base64 data URL of the largest accepted photo is about 2.7 MiB.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Public routes (no session)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/auth/login", post(auth::login));

    // Protected routes (session middleware)
    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/menu", get(menu::get_menu))
        .route("/api/v1/menu/reload", post(menu::reload))
        .route("/api/v1/menu/lookup", get(menu::lookup))
        .route("/api/v1/menu/items/{id}/toggle", post(menu::toggle))
        .route("/api/v1/menu/items/{id}/expand-parents", post(menu::expand_parents))
        .route("/api/v1/menu/active", put(menu::set_active))
        .route("/api/v1/menu/search", put(menu::set_search).delete(menu::clear_search))
        .route(
            "/api/v1/preferences",
            get(preferences::get_preferences).put(preferences::save_preferences),
        )
        .route("/api/v1/preferences/refresh", post(preferences::refresh_preferences))
        .route("/api/v1/navigation", post(navigation::navigate))
        .route("/api/v1/navigation/check", get(navigation::check))
        .route("/api/v1/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/v1/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/api/v1/users/{id}/photo", post(users::upload_photo))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let cors = cors_layer(&state.config.app.frontend_origin);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    match frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!("Ignoring invalid frontend origin {:?}: {}", frontend_origin, e);
            layer
        }
    }
}
