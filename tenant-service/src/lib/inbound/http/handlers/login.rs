use auth::TokenPair;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::UserData;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::TenantId;
use crate::domain::identity::models::WorkspaceId;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::cookies;
use crate::inbound::http::response::ApiError;
use crate::inbound::http::response::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let command = body.try_into_command()?;

    let outcome = state.auth_service.login(command).await.map_err(|e| {
        tracing::warn!(error = %e, "Login rejected");
        ApiError::from(e)
    })?;

    let jar = cookies::with_session(
        jar,
        &state.cookies,
        &outcome.tokens,
        state.access_token_ttl_secs,
        state.refresh_token_ttl_secs,
    );

    Ok((
        jar,
        ApiSuccess::new(
            "Login Success",
            LoginResponseData {
                user: (&outcome.identity).into(),
                tokens: outcome.tokens,
            },
        ),
    ))
}

/// Login body. `tenantId` and `workspaceId` come as a pair or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    email: String,
    password: String,
    tenant_id: Option<i64>,
    workspace_id: Option<i64>,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let email =
            EmailAddress::new(self.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let workspace = match (self.tenant_id, self.workspace_id) {
            (Some(tenant_id), Some(workspace_id)) => {
                Some((TenantId(tenant_id), WorkspaceId(workspace_id)))
            }
            (None, None) => None,
            _ => {
                return Err(ApiError::BadRequest(
                    "tenantId and workspaceId must be given together".to_string(),
                ))
            }
        };

        Ok(LoginCommand {
            email,
            password: self.password,
            workspace,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub tokens: TokenPair,
}
