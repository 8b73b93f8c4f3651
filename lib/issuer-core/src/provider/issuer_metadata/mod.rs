use serde_json::Value;
use thiserror::Error;

use self::model::{CredentialConfiguration, IssuerCredentialResponseEncryption};

pub mod model;
pub mod static_provider;


#[derive(Debug, Error)]
pub enum IssuerMetadataError {
    #[error("Credential configuration `{0}` is not offered")]
    UnknownCredentialConfiguration(String),
    #[error("Unsupported metadata version `{0}`, must be 1.0")]
    UnsupportedVersion(String),
    #[error("Could not read metadata file `{path}`: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Could not parse metadata: {0}")]
    Parsing(#[from] serde_json::Error),
}

/// Source of the published issuer metadata and OpenID configuration
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait IssuerMetadataProvider: Send + Sync {
    /// Credential issuer identifier, expected as proof audience
    fn credential_issuer(&self) -> String;

    fn get_credential_configuration(
        &self,
        credential_configuration_id: &str,
    ) -> Result<CredentialConfiguration, IssuerMetadataError>;

    fn response_encryption(&self) -> Option<IssuerCredentialResponseEncryption>;

    /// Document served at `/.well-known/openid-credential-issuer`
    fn issuer_metadata(&self) -> Value;

    /// Document served at `/.well-known/openid-configuration`
    fn openid_configuration(&self) -> Value;
}
