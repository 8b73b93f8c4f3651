use time::OffsetDateTime;

use super::dto::{OpenID4VCITokenResponseDTO, TOKEN_TYPE_BEARER};
use crate::model::credential_offer::CredentialOffer;
use crate::service::error::ServiceError;

pub(super) fn token_response_from_offer(
    offer: &CredentialOffer,
    now: OffsetDateTime,
) -> Result<OpenID4VCITokenResponseDTO, ServiceError> {
    let access_token = offer
        .access_token
        .ok_or_else(|| ServiceError::MappingError("access_token is None".to_string()))?;
    let expires_at = offer.token_expiration_timestamp.ok_or_else(|| {
        ServiceError::MappingError("token_expiration_timestamp is None".to_string())
    })?;

    Ok(OpenID4VCITokenResponseDTO {
        access_token: access_token.to_string(),
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: (expires_at - now).whole_seconds(),
        c_nonce: offer.nonce.to_string(),
    })
}
