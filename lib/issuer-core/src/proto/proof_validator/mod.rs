//! Holder binding proof validation for credential requests.
//!
//! Checks run in a fixed order and the first failing check determines the
//! reported reason.

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use issuer_crypto::jwe::RemoteJwk;
use issuer_crypto::signer::es256::ES256Signer;
use serde::{Deserialize, Serialize};

use self::model::{
    CredentialRequestProof, HolderBindingKey, PROOF_JWT_TYPE, ProofValidationContext,
    ProofValidationError,
};
use crate::model::credential_offer::CredentialOffer;
use crate::proto::jwt::Jwt;
use crate::proto::jwt::model::JWTHeader;

pub mod model;


const DID_JWK_PREFIX: &str = "did:jwk:";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProofPayload {
    #[serde(default)]
    nonce: Option<String>,
}

impl CredentialRequestProof {
    /// Returns the key the credential must be bound to.
    pub fn validate(
        &self,
        offer: &CredentialOffer,
        context: &ProofValidationContext,
    ) -> Result<HolderBindingKey, ProofValidationError> {
        match self {
            Self::Jwt { jwt } => validate_jwt_proof(jwt, offer, context),
        }
    }
}

fn validate_jwt_proof(
    jwt: &str,
    offer: &CredentialOffer,
    context: &ProofValidationContext,
) -> Result<HolderBindingKey, ProofValidationError> {
    let token = Jwt::<ProofPayload>::decompose_token(jwt)
        .map_err(|e| ProofValidationError::NotParseable(e.to_string()))?;
    let header = &token.header;

    if header.r#type.as_deref() != Some(PROOF_JWT_TYPE) {
        return Err(ProofValidationError::UnsupportedProofType(
            header.r#type.clone().unwrap_or_else(|| "null".to_string()),
        ));
    }

    let algorithm = header
        .algorithm
        .as_deref()
        .filter(|algorithm| {
            context
                .supported_signing_algorithms
                .iter()
                .any(|supported| supported == algorithm)
        })
        .ok_or(ProofValidationError::UnsupportedSigningAlgorithm)?;

    let audience_matches = token
        .payload
        .audience
        .as_ref()
        .is_some_and(|audience| audience.iter().any(|aud| aud == context.issuer_id));
    if !audience_matches {
        return Err(ProofValidationError::InvalidAudience);
    }

    if token.payload.issued_at.is_none() {
        return Err(ProofValidationError::MissingIssueTime);
    }

    let holder_key = holder_key_from_header(header)?;
    let public_key = ES256Signer::public_key_from_jwk(&holder_key)
        .map_err(|e| ProofValidationError::UnusableKey(e.to_string()))?;
    let signer = context
        .crypto
        .get_signer(algorithm)
        .map_err(|e| ProofValidationError::UnusableKey(e.to_string()))?;

    signer
        .verify(
            token.unverified_jwt.as_bytes(),
            &token.signature,
            &public_key,
        )
        .map_err(|_| ProofValidationError::InvalidSignature)?;

    let expected_nonce = offer.nonce.to_string();
    if token.payload.custom.nonce.as_deref() != Some(expected_nonce.as_str()) {
        return Err(ProofValidationError::NonceMismatch);
    }

    if offer.is_token_expired(context.now) {
        return Err(ProofValidationError::TokenExpired);
    }

    Ok(HolderBindingKey(holder_key))
}

/// `kid` (did:jwk) takes precedence over an embedded `jwk`
fn holder_key_from_header(header: &JWTHeader) -> Result<RemoteJwk, ProofValidationError> {
    if let Some(kid) = header.key_id.as_deref().filter(|kid| !kid.is_empty()) {
        return parse_did_jwk(kid)
            .ok_or_else(|| ProofValidationError::InvalidKeyId(kid.to_string()));
    }

    let jwk = header.jwk.clone().ok_or(ProofValidationError::MissingJwk)?;
    serde_json::from_value(jwk).map_err(|e| ProofValidationError::UnusableKey(e.to_string()))
}

fn parse_did_jwk(did: &str) -> Option<RemoteJwk> {
    let encoded = did.strip_prefix(DID_JWK_PREFIX)?;
    let encoded = encoded
        .split_once('#')
        .map_or(encoded, |(method_specific_id, _fragment)| method_specific_id);

    let decoded = Base64UrlSafeNoPadding::decode_to_vec(encoded, None).ok()?;
    serde_json::from_slice(&decoded).ok()
}
