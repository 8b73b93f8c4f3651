use std::sync::Arc;

use issuer_crypto::CryptoProvider;
use time::Duration;

use crate::provider::credential_formatter::provider::CredentialFormatBuilderProvider;
use crate::provider::issuer_metadata::IssuerMetadataProvider;
use crate::repository::credential_offer_repository::CredentialOfferRepository;
use crate::repository::status_list_repository::StatusListRepository;

pub mod dto;
pub(crate) mod mapper;
pub mod service;
pub(crate) mod validator;

#[derive(Clone, Debug)]
pub struct IssuanceContext {
    /// Lifetime of access tokens minted by the token endpoint
    pub token_ttl: Duration,
}

#[derive(Clone)]
pub struct OID4VCIService {
    credential_offer_repository: Arc<dyn CredentialOfferRepository>,
    status_list_repository: Arc<dyn StatusListRepository>,
    metadata_provider: Arc<dyn IssuerMetadataProvider>,
    format_builder_provider: Arc<dyn CredentialFormatBuilderProvider>,
    crypto: Arc<dyn CryptoProvider>,
    context: IssuanceContext,
}

impl OID4VCIService {
    pub(crate) fn new(
        credential_offer_repository: Arc<dyn CredentialOfferRepository>,
        status_list_repository: Arc<dyn StatusListRepository>,
        metadata_provider: Arc<dyn IssuerMetadataProvider>,
        format_builder_provider: Arc<dyn CredentialFormatBuilderProvider>,
        crypto: Arc<dyn CryptoProvider>,
        context: IssuanceContext,
    ) -> Self {
        Self {
            credential_offer_repository,
            status_list_repository,
            metadata_provider,
            format_builder_provider,
            crypto,
            context,
        }
    }
}
