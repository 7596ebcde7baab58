use axum::extract::OriginalUri;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use chrono::SecondsFormat;
use chrono::Utc;

use super::response::ApiError;
use super::response::InternalErrorBody;
use super::response::InternalErrorDetail;
use crate::identity::errors::IdentityError;
use crate::identity::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Middleware that validates the access token and adds the principal to request extensions
///
/// The token is taken from `Authorization: Bearer` first, then the access cookie.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let jar = CookieJar::from_headers(req.headers());
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let cookie = jar
        .get(&state.cookies.access_token_name)
        .map(|cookie| cookie.value());

    let principal = auth::extract::access_token(authorization, cookie)
        .map_err(IdentityError::from)
        .and_then(|token| state.auth_service.authorize(token))
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Access token rejected");
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Replace the body of every 500 with an [`InternalErrorBody`] naming the
/// request path and time. Details stay out of the body in production.
pub async fn render_internal_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.to_string())
        .unwrap_or_else(|| req.uri().to_string());
    let response = next.run(req).await;

    let detail = response.extensions().get::<InternalErrorDetail>().cloned();
    let Some(InternalErrorDetail(detail)) = detail else {
        return response;
    };

    InternalErrorBody::new(
        detail,
        state.production,
        path,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )
    .into_response()
}
