use issuer_crypto::jwe::RemoteJwk;
use serde::{Deserialize, Serialize};

use crate::model::credential_offer::CredentialOffer;
use crate::model::status_list::StatusListSlot;
use crate::proto::proof_validator::model::HolderBindingKey;
use crate::provider::issuer_metadata::model::CredentialConfiguration;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JWT: &str = "application/jwt";

/// Holder request to encrypt the credential response
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CredentialResponseEncryption {
    pub jwk: RemoteJwk,
    pub alg: String,
    pub enc: String,
}

#[derive(Clone, Debug)]
pub struct CredentialBuildRequest {
    pub offer: CredentialOffer,
    pub configuration: CredentialConfiguration,
    /// `None` for unbound credentials
    pub holder_binding: Option<HolderBindingKey>,
    pub response_encryption: Option<CredentialResponseEncryption>,
    pub credential_types: Vec<String>,
    pub status_list_slots: Vec<StatusListSlot>,
}

/// Final HTTP payload of the credential endpoint
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialEnvelope {
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CredentialResponse {
    pub format: String,
    pub credential: String,
}
