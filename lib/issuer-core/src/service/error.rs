use shared_types::{CredentialOfferId, StatusListId};
use strum::Display;
use thiserror::Error;

use crate::model::credential_offer::CredentialOfferStateEnum;
use crate::provider::credential_formatter::error::FormatterError;
use crate::provider::issuer_metadata::IssuerMetadataError;
use crate::repository::error::DataLayerError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    CredentialRequest(#[from] CredentialRequestError),

    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),
    #[error("Status list `{0}` has no free index left")]
    StatusListFull(StatusListId),

    #[error(transparent)]
    Repository(DataLayerError),
    #[error("Formatter error `{0}`")]
    FormatterError(#[from] FormatterError),
    #[error("Issuer metadata error `{0}`")]
    MetadataError(#[from] IssuerMetadataError),
    #[error("Mapping error: `{0}`")]
    MappingError(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<DataLayerError> for ServiceError {
    fn from(value: DataLayerError) -> Self {
        match value {
            DataLayerError::CapacityExceeded(id) => Self::StatusListFull(id),
            other => Self::Repository(other),
        }
    }
}

/// Token endpoint error codes, RFC 6749 section 5.2
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum OAuthErrorCode {
    InvalidRequest,
    InvalidGrant,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{error}: {description}")]
pub struct OAuthError {
    pub error: OAuthErrorCode,
    pub description: String,
}

impl OAuthError {
    pub fn invalid_request(description: impl Into<String>) -> Self {
        Self {
            error: OAuthErrorCode::InvalidRequest,
            description: description.into(),
        }
    }

    pub fn invalid_grant(description: impl Into<String>) -> Self {
        Self {
            error: OAuthErrorCode::InvalidGrant,
            description: description.into(),
        }
    }
}

/// Credential endpoint error codes, OpenID4VCI section 8.3.1
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CredentialRequestErrorCode {
    InvalidProof,
    InvalidCredentialRequest,
    UnsupportedCredentialFormat,
    InvalidEncryptionParameters,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{error}: {description}")]
pub struct CredentialRequestError {
    pub error: CredentialRequestErrorCode,
    pub description: String,
}

impl CredentialRequestError {
    pub fn new(error: CredentialRequestErrorCode, description: impl Into<String>) -> Self {
        Self {
            error,
            description: description.into(),
        }
    }

    pub fn invalid_proof(description: impl Into<String>) -> Self {
        Self::new(CredentialRequestErrorCode::InvalidProof, description)
    }
}

#[derive(Debug, Error)]
pub enum EntityNotFoundError {
    #[error("Credential offer `{0}` not found")]
    CredentialOffer(CredentialOfferId),
    #[error("Status list `{0}` not found")]
    StatusList(StatusListId),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Credential offer `{id}` is {state}, status list slots can only be linked to offered credentials")]
    CredentialOfferNotLinkable {
        id: CredentialOfferId,
        state: CredentialOfferStateEnum,
    },
    #[error("Credential offer `{0}` is already linked to this status list")]
    StatusListAlreadyLinked(CredentialOfferId),
}
