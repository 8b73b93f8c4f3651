use self::error::FormatterError;
use self::model::{CredentialBuildRequest, CredentialEnvelope};

pub mod envelope;
pub mod error;
pub mod model;
pub mod provider;

// Implementations
pub mod sdjwtvc_formatter;


/// Turns an accepted credential request into the signed credential
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CredentialFormatBuilder: Send + Sync {
    async fn build(
        &self,
        request: CredentialBuildRequest,
    ) -> Result<CredentialEnvelope, FormatterError>;
}
