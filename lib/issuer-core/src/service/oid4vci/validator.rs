use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{OpenID4VCITokenRequestDTO, PRE_AUTHORIZED_CODE_GRANT_TYPE};
use crate::model::credential_offer::{CredentialOffer, CredentialOfferStateEnum};
use crate::provider::credential_formatter::model::CredentialResponseEncryption;
use crate::provider::issuer_metadata::model::{
    CredentialConfiguration, IssuerCredentialResponseEncryption,
};
use crate::service::error::{
    CredentialRequestError, CredentialRequestErrorCode, OAuthError, ServiceError,
};

pub(super) fn throw_if_token_request_invalid(
    request: &OpenID4VCITokenRequestDTO,
) -> Result<(), ServiceError> {
    if request.grant_type != PRE_AUTHORIZED_CODE_GRANT_TYPE {
        return Err(OAuthError::invalid_request(format!(
            "Grant type must be {PRE_AUTHORIZED_CODE_GRANT_TYPE}"
        ))
        .into());
    }
    Ok(())
}

/// Pre-authorized codes and access tokens are UUIDs
pub(super) fn parse_uuid(value: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(value).map_err(|_| OAuthError::invalid_request("Expecting a correct UUID").into())
}

pub(super) fn throw_if_offer_not_in_progress(offer: &CredentialOffer) -> Result<(), ServiceError> {
    if offer.state != CredentialOfferStateEnum::InProgress {
        return Err(offer_not_valid_error(offer.state));
    }
    Ok(())
}

pub(super) fn offer_not_valid_error(state: CredentialOfferStateEnum) -> ServiceError {
    OAuthError::invalid_grant(format!(
        "Offer is not anymore valid. The current offer state is {state}. \
         The user should probably contact the business issuer about this."
    ))
    .into()
}

pub(super) fn throw_if_access_token_expired(
    offer: &CredentialOffer,
    now: OffsetDateTime,
) -> Result<(), ServiceError> {
    if offer.is_token_expired(now) {
        return Err(OAuthError::invalid_grant("Access token expired").into());
    }
    Ok(())
}

pub(super) fn throw_if_format_mismatch(
    configuration: &CredentialConfiguration,
    requested_format: &str,
) -> Result<(), ServiceError> {
    if configuration.format != requested_format {
        return Err(CredentialRequestError::new(
            CredentialRequestErrorCode::UnsupportedCredentialFormat,
            "Mismatch between requested and offered format.",
        )
        .into());
    }
    Ok(())
}

/// Negotiates credential response encryption against the issuer policy
pub(super) fn throw_if_response_encryption_invalid(
    policy: Option<&IssuerCredentialResponseEncryption>,
    requested: Option<&CredentialResponseEncryption>,
) -> Result<(), ServiceError> {
    let description = match (policy, requested) {
        (Some(policy), Some(requested)) if !policy.contains(requested) => {
            "Requested credential response encryption is not supported"
        }
        (None, Some(_)) => "Credential response encryption is not supported by this issuer",
        (Some(policy), None) if policy.encryption_required => {
            "Credential response encryption is required"
        }
        _ => return Ok(()),
    };

    Err(CredentialRequestError::new(
        CredentialRequestErrorCode::InvalidEncryptionParameters,
        description,
    )
    .into())
}
