use issuer_crypto::CryptoProvider;
use issuer_crypto::jwe::RemoteJwk;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;
use time::OffsetDateTime;

pub const PROOF_JWT_TYPE: &str = "openid4vci-proof+jwt";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum ProofType {
    #[strum(serialize = "jwt")]
    Jwt,
}

/// Holder binding proof sent with a credential request
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CredentialRequestProof {
    Jwt { jwt: String },
}

impl CredentialRequestProof {
    pub fn proof_type(&self) -> ProofType {
        match self {
            Self::Jwt { .. } => ProofType::Jwt,
        }
    }
}

/// Read-only inputs for one validation run
pub struct ProofValidationContext<'a> {
    /// Credential issuer identifier, expected in `aud`
    pub issuer_id: &'a str,
    pub supported_signing_algorithms: &'a [String],
    pub now: OffsetDateTime,
    pub crypto: &'a dyn CryptoProvider,
}

/// Public key the issued credential gets bound to (`cnf`)
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderBindingKey(pub RemoteJwk);

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProofValidationError {
    #[error("Proof Type is not supported. Must be 'openid4vci-proof+jwt' but was {0}")]
    UnsupportedProofType(String),
    #[error("Proof Signing Algorithm is not supported")]
    UnsupportedSigningAlgorithm,
    #[error("Audience claim is missing or incorrect")]
    InvalidAudience,
    #[error("Issue Time claim is missing")]
    MissingIssueTime,
    #[error("kid property {0} could not be parsed to a JWK")]
    InvalidKeyId(String),
    #[error("Missing jwk entry in header.")]
    MissingJwk,
    #[error("Key is not usable; {0}")]
    UnusableKey(String),
    #[error("Proof JWT is not valid!")]
    InvalidSignature,
    #[error("Nonce claim does not match the server-provided c_nonce value")]
    NonceMismatch,
    #[error("Token is expired")]
    TokenExpired,
    #[error("Provided Proof JWT is not parseable; {0}")]
    NotParseable(String),
}
