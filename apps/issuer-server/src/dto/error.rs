use axum::extract::rejection::{FormRejection, JsonRejection};
use issuer_core::service::error::{
    CredentialRequestError, CredentialRequestErrorCode, OAuthError, OAuthErrorCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVER_ERROR: &str = "server_error";

/// Error body shared by the token and credential endpoints
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponseRestDTO {
    #[schema(example = "invalid_grant")]
    pub error: String,
    pub error_description: String,
}

impl ErrorResponseRestDTO {
    pub fn new(error: impl ToString, error_description: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            error_description: error_description.into(),
        }
    }
}

impl From<OAuthError> for ErrorResponseRestDTO {
    fn from(value: OAuthError) -> Self {
        Self::new(value.error, value.description)
    }
}

impl From<CredentialRequestError> for ErrorResponseRestDTO {
    fn from(value: CredentialRequestError) -> Self {
        Self::new(value.error, value.description)
    }
}

impl From<FormRejection> for ErrorResponseRestDTO {
    fn from(value: FormRejection) -> Self {
        Self::new(OAuthErrorCode::InvalidRequest, value.body_text())
    }
}

impl From<JsonRejection> for ErrorResponseRestDTO {
    fn from(value: JsonRejection) -> Self {
        Self::new(
            CredentialRequestErrorCode::InvalidCredentialRequest,
            value.body_text(),
        )
    }
}
