use auth::TokenPair;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use time::Duration;

use crate::config::CookieConfig;

/// Path scope of the refresh cookie: only the session endpoints see it.
pub const REFRESH_COOKIE_PATH: &str = "/api/tenants/auth";

pub fn access_cookie(config: &CookieConfig, token: &str, ttl_secs: i64) -> Cookie<'static> {
    Cookie::build((config.access_token_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(Duration::seconds(ttl_secs))
        .build()
}

pub fn refresh_cookie(config: &CookieConfig, token: &str, ttl_secs: i64) -> Cookie<'static> {
    Cookie::build((config.refresh_token_name.clone(), token.to_string()))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.secure)
        .max_age(Duration::seconds(ttl_secs))
        .build()
}

/// Add both session cookies for a freshly issued pair.
pub fn with_session(
    jar: CookieJar,
    config: &CookieConfig,
    tokens: &TokenPair,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
) -> CookieJar {
    jar.add(access_cookie(config, &tokens.access_token, access_ttl_secs))
        .add(refresh_cookie(config, &tokens.refresh_token, refresh_ttl_secs))
}

/// Expire both session cookies. Removal cookies carry the same attributes as
/// the ones they replace, so browsers match and drop them.
pub fn without_session(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(access_cookie(config, "", 0))
        .add(refresh_cookie(config, "", 0))
}
