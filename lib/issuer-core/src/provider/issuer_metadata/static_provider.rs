use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::model::{
    CredentialConfiguration, IssuerCredentialResponseEncryption, IssuerMetadata,
    SUPPORTED_METADATA_VERSION,
};
use super::{IssuerMetadataError, IssuerMetadataProvider};

/// Metadata documents loaded once at startup
pub struct StaticIssuerMetadataProvider {
    metadata: IssuerMetadata,
    metadata_document: Value,
    openid_configuration: Value,
}

impl StaticIssuerMetadataProvider {
    pub fn from_files(
        metadata_file: &Path,
        openid_file: &Path,
        template_replacement: &HashMap<String, String>,
    ) -> Result<Self, IssuerMetadataError> {
        let metadata = read_file(metadata_file)?;
        let openid_configuration = read_file(openid_file)?;

        Self::new(&metadata, &openid_configuration, template_replacement)
    }

    pub fn new(
        metadata_template: &str,
        openid_template: &str,
        template_replacement: &HashMap<String, String>,
    ) -> Result<Self, IssuerMetadataError> {
        let metadata_json = replace_placeholders(metadata_template, template_replacement);
        let openid_json = replace_placeholders(openid_template, template_replacement);

        let metadata_document: Value = serde_json::from_str(&metadata_json)?;
        let metadata: IssuerMetadata = serde_json::from_value(metadata_document.clone())?;
        if metadata.version != SUPPORTED_METADATA_VERSION {
            return Err(IssuerMetadataError::UnsupportedVersion(metadata.version));
        }

        Ok(Self {
            metadata,
            metadata_document,
            openid_configuration: serde_json::from_str(&openid_json)?,
        })
    }
}

impl IssuerMetadataProvider for StaticIssuerMetadataProvider {
    fn credential_issuer(&self) -> String {
        self.metadata.credential_issuer.to_owned()
    }

    fn get_credential_configuration(
        &self,
        credential_configuration_id: &str,
    ) -> Result<CredentialConfiguration, IssuerMetadataError> {
        self.metadata
            .credential_configurations
            .get(credential_configuration_id)
            .cloned()
            .ok_or_else(|| {
                IssuerMetadataError::UnknownCredentialConfiguration(
                    credential_configuration_id.to_owned(),
                )
            })
    }

    fn response_encryption(&self) -> Option<IssuerCredentialResponseEncryption> {
        self.metadata.response_encryption.clone()
    }

    fn issuer_metadata(&self) -> Value {
        self.metadata_document.clone()
    }

    fn openid_configuration(&self) -> Value {
        self.openid_configuration.clone()
    }
}

fn read_file(path: &Path) -> Result<String, IssuerMetadataError> {
    std::fs::read_to_string(path).map_err(|source| IssuerMetadataError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Substitutes `${key}` placeholders, unknown placeholders are left as they are
fn replace_placeholders(template: &str, replacements: &HashMap<String, String>) -> String {
    replacements
        .iter()
        .fold(template.to_owned(), |document, (key, value)| {
            document.replace(&format!("${{{key}}}"), value)
        })
}
