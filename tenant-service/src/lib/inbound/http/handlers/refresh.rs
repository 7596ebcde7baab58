use auth::TokenPair;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::cookies;
use crate::inbound::http::response::ApiError;
use crate::inbound::http::response::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange an access token (header or cookie, may be expired) and a refresh
/// token (body or cookie) for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Option<Json<RefreshRequestBody>>,
) -> Result<(CookieJar, ApiSuccess<TokenPair>), ApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let access_cookie = jar
        .get(&state.cookies.access_token_name)
        .map(|cookie| cookie.value());
    let access_token =
        auth::extract::access_token(authorization, access_cookie).map_err(IdentityError::from)?;

    let body_token = body.as_ref().and_then(|Json(body)| body.refresh_token.as_deref());
    let refresh_cookie = jar
        .get(&state.cookies.refresh_token_name)
        .map(|cookie| cookie.value());
    let refresh_token =
        auth::extract::refresh_token(body_token, refresh_cookie).map_err(IdentityError::from)?;

    let tokens = state
        .auth_service
        .refresh(access_token, refresh_token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Token refresh rejected");
            ApiError::from(e)
        })?;

    let jar = cookies::with_session(
        jar,
        &state.cookies,
        &tokens,
        state.access_token_ttl_secs,
        state.refresh_token_ttl_secs,
    );

    Ok((jar, ApiSuccess::new("Token Issued", tokens)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    #[serde(default)]
    refresh_token: Option<String>,
}
