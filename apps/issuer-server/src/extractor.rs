use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use issuer_core::service::error::OAuthErrorCode;

use crate::dto::error::ErrorResponseRestDTO;
use crate::dto::response::ErrorResponse;

const BEARER_PREFIX: &str = "bearer ";

/// Access token taken from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| invalid_request("No authorization header found"))?;

        parse_bearer_token(header)
            .map(|token| Self(token.to_owned()))
            .ok_or_else(|| invalid_request("No bearer token found"))
    }
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let scheme = header.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    header.get(BEARER_PREFIX.len()..).map(str::trim)
}

fn invalid_request(description: &str) -> ErrorResponse {
    ErrorResponse::BadRequest(ErrorResponseRestDTO::new(
        OAuthErrorCode::InvalidRequest,
        description,
    ))
}
