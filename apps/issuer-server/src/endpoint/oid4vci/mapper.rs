use issuer_core::proto::proof_validator::model::CredentialRequestProof;
use issuer_core::service::error::CredentialRequestErrorCode;
use issuer_core::service::oid4vci::dto::OpenID4VCICredentialRequestDTO;

use super::dto::{OpenID4VCICredentialRequestRestDTO, OpenID4VCIProofRequestRestDTO};
use crate::dto::error::ErrorResponseRestDTO;

const PROOF_TYPE_JWT: &str = "jwt";

impl TryFrom<OpenID4VCICredentialRequestRestDTO> for OpenID4VCICredentialRequestDTO {
    type Error = ErrorResponseRestDTO;

    fn try_from(value: OpenID4VCICredentialRequestRestDTO) -> Result<Self, Self::Error> {
        Ok(Self {
            format: value.format,
            proof: value.proof.map(proof_from_request).transpose()?.flatten(),
            credential_response_encryption: value.credential_response_encryption.map(Into::into),
        })
    }
}

/// Proof types other than `jwt` have no representation and are dropped,
/// a bound credential then fails on the missing proof.
fn proof_from_request(
    proof: OpenID4VCIProofRequestRestDTO,
) -> Result<Option<CredentialRequestProof>, ErrorResponseRestDTO> {
    if proof.proof_type != PROOF_TYPE_JWT {
        tracing::debug!("Ignoring unsupported proof type `{}`", proof.proof_type);
        return Ok(None);
    }

    let jwt = proof.jwt.ok_or_else(|| {
        ErrorResponseRestDTO::new(
            CredentialRequestErrorCode::InvalidCredentialRequest,
            "Proof of type `jwt` is missing the `jwt` field",
        )
    })?;

    Ok(Some(CredentialRequestProof::Jwt { jwt }))
}
