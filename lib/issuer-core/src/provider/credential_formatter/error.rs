use thiserror::Error;

use crate::proto::jwt::JwtError;

#[derive(Debug, Error)]
pub enum FormatterError {
    #[error("Missing format builder for `{0}`")]
    MissingFormatBuilder(String),
    #[error("Offer data is missing")]
    MissingOfferData,
    #[error("Invalid offer data: `{0}`")]
    InvalidOfferData(String),
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not encrypt credential response: `{0}`")]
    CouldNotEncrypt(String),
    #[error("Crypto provider error: `{0}`")]
    CryptoProvider(#[from] issuer_crypto::CryptoProviderError),
}

impl From<JwtError> for FormatterError {
    fn from(value: JwtError) -> Self {
        match value {
            JwtError::CouldNotSign(reason) => Self::CouldNotSign(reason),
            JwtError::CouldNotExtract(reason) => Self::InvalidOfferData(reason),
            JwtError::CouldNotFormat(reason) => Self::CouldNotFormat(reason),
        }
    }
}
