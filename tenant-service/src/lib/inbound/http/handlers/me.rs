use axum::Extension;
use serde::Serialize;

use crate::domain::identity::models::AuthenticatedPrincipal;
use crate::inbound::http::response::ApiSuccess;

pub async fn me(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new("success", (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseData {
    pub user_id: String,
    pub tenant_id: String,
    pub workspace_id: String,
    pub role: auth::Role,
}

impl From<&AuthenticatedPrincipal> for MeResponseData {
    fn from(principal: &AuthenticatedPrincipal) -> Self {
        Self {
            user_id: principal.user_id.to_string(),
            tenant_id: principal.tenant_id.to_string(),
            workspace_id: principal.workspace_id.to_string(),
            role: principal.role,
        }
    }
}
