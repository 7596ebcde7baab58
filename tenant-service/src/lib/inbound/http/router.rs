use std::sync::Arc;
use std::time::Duration;

use auth::TokenSettings;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::middleware::authenticate as auth_middleware;
use super::middleware::render_internal_errors;
use super::response::ApiError;
use crate::config::CookieConfig;
use crate::domain::identity::service::AuthService;
use crate::outbound::repositories::identity::InMemoryIdentityRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryIdentityRepository>>,
    pub cookies: CookieConfig,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    /// Hide internal error details from response bodies
    pub production: bool,
}

/// Build the HTTP router.
///
/// # Arguments
/// * `auth_service` - Session operations
/// * `cookies` - Session cookie names and flags
/// * `token_settings` - Token lifetimes, reused as cookie max-age
/// * `production` - Hide internal error details from response bodies
pub fn create_router(
    auth_service: Arc<AuthService<InMemoryIdentityRepository>>,
    cookies: CookieConfig,
    token_settings: &TokenSettings,
    production: bool,
) -> Router {
    let state = AppState {
        auth_service,
        cookies,
        access_token_ttl_secs: token_settings.access_token_validity_secs,
        refresh_token_ttl_secs: token_settings.refresh_token_validity_secs,
        production,
    };

    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signin", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let router = Router::new()
        .nest(
            "/api/tenants",
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .fallback(not_found);

    // Applied innermost so the trace layer sees the final status.
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_internal_errors,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
