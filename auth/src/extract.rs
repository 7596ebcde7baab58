//! Locating tokens in request data.
//!
//! These helpers take already-extracted header/cookie/body values so the
//! library stays independent of any HTTP framework.

use thiserror::Error;

/// No usable token was supplied with the request.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenMissing {
    #[error("Access Token Missing")]
    AccessToken,

    #[error("Refresh Token is missing")]
    RefreshToken,
}

/// Find the access token: `Authorization: Bearer <token>` first, then the cookie.
///
/// # Errors
/// * `AccessToken` - Neither source carries a non-blank token
pub fn access_token<'a>(
    authorization: Option<&'a str>,
    cookie: Option<&'a str>,
) -> Result<&'a str, TokenMissing> {
    if let Some(token) = authorization.and_then(|value| value.strip_prefix("Bearer ")) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    cookie
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenMissing::AccessToken)
}

/// Find the refresh token: request body field first, then the cookie.
///
/// # Errors
/// * `RefreshToken` - Neither source carries a non-empty token
pub fn refresh_token<'a>(
    body: Option<&'a str>,
    cookie: Option<&'a str>,
) -> Result<&'a str, TokenMissing> {
    body.filter(|token| !token.is_empty())
        .or_else(|| cookie.filter(|token| !token.is_empty()))
        .ok_or(TokenMissing::RefreshToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_prefers_bearer_header() {
        let token = access_token(Some("Bearer header.token.value"), Some("cookie.token"));
        assert_eq!(token, Ok("header.token.value"));
    }

    #[test]
    fn test_access_token_falls_back_to_cookie() {
        assert_eq!(access_token(None, Some("cookie.token")), Ok("cookie.token"));
        assert_eq!(
            access_token(Some("Basic dXNlcjpwYXNz"), Some("cookie.token")),
            Ok("cookie.token")
        );
    }

    #[test]
    fn test_access_token_missing() {
        assert_eq!(access_token(None, None), Err(TokenMissing::AccessToken));
        assert_eq!(access_token(Some("Bearer "), Some("   ")), Err(TokenMissing::AccessToken));
    }

    #[test]
    fn test_refresh_token_sources() {
        assert_eq!(refresh_token(Some("body"), Some("cookie")), Ok("body"));
        assert_eq!(refresh_token(None, Some("cookie")), Ok("cookie"));
        assert_eq!(refresh_token(Some(""), Some("cookie")), Ok("cookie"));
        assert_eq!(refresh_token(None, None), Err(TokenMissing::RefreshToken));
    }

    #[test]
    fn test_missing_messages() {
        assert_eq!(TokenMissing::AccessToken.to_string(), "Access Token Missing");
        assert_eq!(TokenMissing::RefreshToken.to_string(), "Refresh Token is missing");
    }
}
