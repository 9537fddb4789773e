/// HTTP routing
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application: `/api/*` plus static `/uploads/*`
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);
    let upload_dir = app_state.file_storage.base_path().to_path_buf();

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/tracks", get(api::tracks::list_tracks))
        .route("/tracks/:id", get(api::tracks::get_track))
        .route("/tracks/:id/play", post(api::tracks::record_play));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(api::auth::me))
        .route("/tracks/upload", post(api::upload::upload_track))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
