use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::provider::credential_formatter::model::CredentialResponseEncryption;

pub const SUPPORTED_METADATA_VERSION: &str = "1.0";

/// Fields of the issuer metadata used for issuance decisions
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IssuerMetadata {
    pub credential_issuer: String,
    pub credential_endpoint: String,
    #[serde(rename = "credential_configurations_supported")]
    pub credential_configurations: HashMap<String, CredentialConfiguration>,
    #[serde(rename = "credential_response_encryption", default)]
    pub response_encryption: Option<IssuerCredentialResponseEncryption>,
    pub version: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialConfiguration {
    pub format: String,
    /// SD-JWT VC type
    #[serde(default)]
    pub vct: Option<String>,
    #[serde(default)]
    pub claims: Option<Map<String, Value>>,
    #[serde(default)]
    pub credential_definition: Option<Value>,
    #[serde(default)]
    pub cryptographic_binding_methods_supported: Option<Vec<String>>,
    #[serde(default)]
    pub credential_signing_alg_values_supported: Option<Vec<String>>,
    #[serde(default)]
    pub proof_types_supported: Option<HashMap<String, SupportedProofType>>,
}

impl CredentialConfiguration {
    /// Holder binding is required whenever at least one proof type is declared
    pub fn requires_proof(&self) -> bool {
        self.proof_types_supported
            .as_ref()
            .is_some_and(|proof_types| !proof_types.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProofType {
    pub proof_signing_alg_values_supported: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerCredentialResponseEncryption {
    pub alg_values_supported: Vec<String>,
    pub enc_values_supported: Vec<String>,
    pub encryption_required: bool,
}

impl IssuerCredentialResponseEncryption {
    pub fn contains(&self, requested: &CredentialResponseEncryption) -> bool {
        self.alg_values_supported.contains(&requested.alg)
            && self.enc_values_supported.contains(&requested.enc)
    }
}
