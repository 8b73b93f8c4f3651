#![cfg_attr(feature = "strict", deny(warnings))]

use std::collections::HashMap;
use std::sync::Arc;

use config::ConfigValidationError;
use config::core_config::CoreConfig;
use issuer_crypto::hasher::sha256::SHA256;
use issuer_crypto::signer::es256::ES256Signer;
use issuer_crypto::{CryptoProvider, CryptoProviderImpl, Hasher, Signer, SignerError};
use provider::credential_formatter::CredentialFormatBuilder;
use provider::credential_formatter::provider::CredentialFormatBuilderProviderImpl;
use provider::credential_formatter::sdjwtvc_formatter::{self, SDJWTVCFormatter};
use provider::issuer_metadata::static_provider::StaticIssuerMetadataProvider;
use provider::issuer_metadata::{IssuerMetadataError, IssuerMetadataProvider};
use repository::DataRepository;
use secrecy::ExposeSecret;
use service::oid4vci::{IssuanceContext, OID4VCIService};
use service::status_list::StatusListService;
use thiserror::Error;

pub mod config;
pub mod model;
pub mod proto;
pub mod provider;
pub mod repository;
pub mod service;

#[cfg(test)]
mod test_utilities;

#[derive(Debug, Error)]
pub enum IssuerCoreError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigValidationError),
    #[error("Could not load issuer metadata: {0}")]
    Metadata(#[from] IssuerMetadataError),
    #[error("Could not load issuer key: {0}")]
    IssuerKey(#[from] SignerError),
}

#[derive(Clone)]
pub struct IssuerCore {
    pub oid4vci_service: OID4VCIService,
    pub status_list_service: StatusListService,
}

impl IssuerCore {
    /// Loads the metadata documents and the issuer key referenced by `config`
    pub fn new(
        data_provider: Arc<dyn DataRepository>,
        config: &CoreConfig,
    ) -> Result<Self, IssuerCoreError> {
        config.validate()?;

        let metadata_provider = StaticIssuerMetadataProvider::from_files(
            &config.issuance.metadata_file,
            &config.issuance.openid_file,
            &config.issuance.template_replacement,
        )?;

        Self::with_metadata_provider(data_provider, config, Arc::new(metadata_provider))
    }

    pub fn with_metadata_provider(
        data_provider: Arc<dyn DataRepository>,
        config: &CoreConfig,
        metadata_provider: Arc<dyn IssuerMetadataProvider>,
    ) -> Result<Self, IssuerCoreError> {
        let crypto: Arc<dyn CryptoProvider> = Arc::new(CryptoProviderImpl::new(
            HashMap::from_iter([("sha-256".to_string(), Arc::new(SHA256) as Arc<dyn Hasher>)]),
            HashMap::from_iter([("ES256".to_string(), Arc::new(ES256Signer) as Arc<dyn Signer>)]),
        ));

        let issuer_key =
            ES256Signer::parse_private_jwk(config.issuer_key.private_jwk.expose_secret())?;

        let sd_jwt_vc_formatter = SDJWTVCFormatter::new(
            crypto.clone(),
            sdjwtvc_formatter::Params {
                issuer_id: metadata_provider.credential_issuer(),
                key_id: config.issuer_key.key_id.to_owned(),
                algorithm: config.issuer_key.algorithm.to_owned(),
            },
            issuer_key.private,
        );
        let format_builder_provider = CredentialFormatBuilderProviderImpl::new(HashMap::from_iter([(
            sdjwtvc_formatter::FORMAT.to_string(),
            Arc::new(sd_jwt_vc_formatter) as Arc<dyn CredentialFormatBuilder>,
        )]));

        let credential_offer_repository = data_provider.get_credential_offer_repository();
        let status_list_repository = data_provider.get_status_list_repository();

        Ok(Self {
            oid4vci_service: OID4VCIService::new(
                credential_offer_repository.clone(),
                status_list_repository.clone(),
                metadata_provider,
                Arc::new(format_builder_provider),
                crypto,
                IssuanceContext {
                    token_ttl: config.issuance.token_ttl,
                },
            ),
            status_list_service: StatusListService::new(
                credential_offer_repository,
                status_list_repository,
            ),
        })
    }
}
