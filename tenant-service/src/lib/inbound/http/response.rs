use auth::AuthenticationError;
use auth::JwtError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde::Serializer;

use crate::identity::errors::IdentityError;

/// Message sent in place of internal error details.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Application-level outcome code carried in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    Failure,
    InvalidAccessToken,
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::Success => "10000",
            ResponseCode::Failure => "10001",
            ResponseCode::InvalidAccessToken => "10003",
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: ResponseCode,
    message: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: ResponseCode::Success,
            message: message.into(),
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponseBody<()> {
    pub fn new_message(message: impl Into<String>) -> Self {
        Self {
            status_code: ResponseCode::Success,
            message: message.into(),
            success: true,
            data: None,
        }
    }

    pub fn new_error(status_code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            success: false,
            data: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        ApiSuccess(StatusCode::OK, Json(ApiResponseBody::new(message, data)))
    }
}

impl ApiSuccess<()> {
    /// Success without a data payload.
    pub fn message(message: impl Into<String>) -> Self {
        ApiSuccess(StatusCode::OK, Json(ApiResponseBody::new_message(message)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials or token content rejected.
    AuthFailure(String),
    /// Access token expired; the client should refresh.
    AccessTokenError(String),
    NotFound(String),
    Forbidden(String),
    BadRequest(String),
    InternalServerError(String),
}

/// Detail of an internal error, kept out of the body and attached to the
/// response extensions for
/// [`render_internal_errors`](super::middleware::render_internal_errors).
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::AuthFailure(msg) => (StatusCode::UNAUTHORIZED, ResponseCode::Failure, msg),
            ApiError::AccessTokenError(msg) => (
                StatusCode::UNAUTHORIZED,
                ResponseCode::InvalidAccessToken,
                msg,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ResponseCode::Failure, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ResponseCode::Failure, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ResponseCode::Failure, msg),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponseBody::new_error(
                        ResponseCode::Failure,
                        GENERIC_ERROR_MESSAGE,
                    )),
                )
                    .into_response();
                response
                    .extensions_mut()
                    .insert(InternalErrorDetail(detail));
                return response;
            }
        };

        (status, Json(ApiResponseBody::new_error(code, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Authentication(AuthenticationError::JwtError(
                JwtError::TokenExpired,
            )) => ApiError::AccessTokenError("Token is expired".to_string()),
            IdentityError::Authentication(AuthenticationError::JwtError(JwtError::BadToken)) => {
                ApiError::AuthFailure("Token is not valid".to_string())
            }
            IdentityError::Authentication(AuthenticationError::InvalidClaims(claims)) => {
                ApiError::AuthFailure(claims.to_string())
            }
            IdentityError::InvalidTokenIdentifier(_) => {
                ApiError::AuthFailure("Invalid Access Token".to_string())
            }
            IdentityError::SessionMismatch => {
                ApiError::AuthFailure("Invalid Access Token".to_string())
            }
            IdentityError::TokenMissing(missing) => ApiError::AuthFailure(missing.to_string()),
            IdentityError::InvalidCredentials => {
                ApiError::AuthFailure("Authentication Failure".to_string())
            }
            IdentityError::NotAMember { .. } | IdentityError::NoMembership { .. } => {
                ApiError::Forbidden("Permission denied".to_string())
            }
            IdentityError::InvalidEmail(_) => ApiError::BadRequest(err.to_string()),
            IdentityError::Authentication(AuthenticationError::JwtError(
                JwtError::Configuration(_)
                | JwtError::EncodingFailed(_)
                | JwtError::InvalidSettings(_),
            ))
            | IdentityError::Authentication(AuthenticationError::PasswordError(_))
            | IdentityError::Store(_)
            | IdentityError::Task(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Body of a 500 response, rendered by
/// [`render_internal_errors`](super::middleware::render_internal_errors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalErrorBody {
    pub success: bool,
    pub status_code: ResponseCode,
    pub message: String,
    /// Only outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// RFC 3339, millisecond precision
    pub time_stamp: String,
    /// Request path and query
    pub path: String,
}

impl InternalErrorBody {
    pub fn new(detail: String, production: bool, path: String, time_stamp: String) -> Self {
        let (message, errors) = if production {
            (GENERIC_ERROR_MESSAGE.to_string(), None)
        } else {
            (detail.clone(), Some(vec![detail]))
        };

        Self {
            success: false,
            status_code: ResponseCode::Failure,
            message,
            errors,
            time_stamp,
            path,
        }
    }
}

impl IntoResponse for InternalErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
