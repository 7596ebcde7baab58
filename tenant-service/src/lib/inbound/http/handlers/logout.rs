use axum::extract::State;
use axum_extra::extract::CookieJar;

use crate::inbound::http::cookies;
use crate::inbound::http::response::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Tokens are not persisted, so logging out only expires the session cookies.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, ApiSuccess<()>) {
    (
        cookies::without_session(jar, &state.cookies),
        ApiSuccess::message("Logout success"),
    )
}
