use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use issuer_core::service::oid4vci::dto::OpenID4VCICredentialRequestDTO;
use serde_json::Value;

use super::dto::{
    OpenID4VCICredentialRequestRestDTO, OpenID4VCITokenRequestRestDTO,
    OpenID4VCITokenResponseRestDTO,
};
use crate::dto::response::{ErrorResponse, OkOrErrorResponse};
use crate::extractor::BearerToken;
use crate::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/token",
    request_body(
        content = OpenID4VCITokenRequestRestDTO,
        description = "Token request",
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(OkOrErrorResponse<OpenID4VCITokenResponseRestDTO>),
    tag = "oid4vci",
    summary = "Redeem pre-authorized code",
    description = "Exchanges the pre-authorized code of a credential offer for a single-use access token and the proof nonce.",
)]
pub(crate) async fn oid4vci_create_token(
    state: State<AppState>,
    request: Result<Form<OpenID4VCITokenRequestRestDTO>, FormRejection>,
) -> OkOrErrorResponse<OpenID4VCITokenResponseRestDTO> {
    let Form(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::info!("Malformed token request: {rejection}");
            return ErrorResponse::BadRequest(rejection.into()).into();
        }
    };

    let result = state.core.oid4vci_service.create_token(request.into()).await;
    OkOrErrorResponse::from_result(result, state, "redeeming pre-authorized code")
}

#[utoipa::path(
    post,
    path = "/api/v1/credential",
    request_body(content = OpenID4VCICredentialRequestRestDTO, description = "Credential request"),
    responses(
        (status = 200, description = "Credential as `{format, credential}` JSON, or an `application/jwt` JWE when response encryption was requested"),
        ErrorResponse,
    ),
    security(
        ("OpenID4VCI" = [])
    ),
    tag = "oid4vci",
    summary = "Issue credential",
    description = "Issues the offered credential to the holder of the access token.",
)]
pub(crate) async fn oid4vci_create_credential(
    state: State<AppState>,
    BearerToken(access_token): BearerToken,
    request: Result<Json<OpenID4VCICredentialRequestRestDTO>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::info!("Malformed credential request: {rejection}");
            return ErrorResponse::UnprocessableEntity(rejection.into()).into_response();
        }
    };

    let request: OpenID4VCICredentialRequestDTO = match request.try_into() {
        Ok(request) => request,
        Err(error) => {
            tracing::info!("Invalid credential request: {}", error.error_description);
            return ErrorResponse::UnprocessableEntity(error).into_response();
        }
    };

    let result = state
        .core
        .oid4vci_service
        .create_credential(&access_token, request)
        .await;

    match result {
        Ok(envelope) => (
            [(header::CONTENT_TYPE, envelope.content_type)],
            envelope.body,
        )
            .into_response(),
        Err(error) => {
            ErrorResponse::from_service_error_with_trace(error, &state, "issuing credential")
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/.well-known/openid-credential-issuer",
    responses(
        (status = 200, description = "OK", body = Object),
    ),
    tag = "oid4vci",
    summary = "Credential issuer metadata",
    description = "Returns the credential issuer metadata document.",
)]
pub(crate) async fn oid4vci_get_issuer_metadata(state: State<AppState>) -> Json<Value> {
    Json(state.core.oid4vci_service.get_issuer_metadata())
}

#[utoipa::path(
    get,
    path = "/api/v1/.well-known/openid-configuration",
    responses(
        (status = 200, description = "OK", body = Object),
    ),
    tag = "oid4vci",
    summary = "OpenID configuration",
    description = "Returns the authorization server metadata document.",
)]
pub(crate) async fn oid4vci_get_openid_configuration(state: State<AppState>) -> Json<Value> {
    Json(state.core.oid4vci_service.get_openid_configuration())
}
