use std::collections::HashMap;
use std::sync::Arc;

use secrecy::SecretSlice;
use thiserror::Error;

pub mod hasher;
pub mod jwe;
pub mod signer;
pub mod utilities;


#[derive(Debug, Error)]
pub enum CryptoProviderError {
    #[error("Missing hasher: `{0}`")]
    MissingHasher(String),
    #[error("Missing signer: `{0}`")]
    MissingSigner(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HasherError {
    #[error("Could not hash")]
    CouldNotHash,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract keypair")]
    CouldNotExtractKeyPair,
    #[error("Could not extract public key: `{0}`")]
    CouldNotExtractPublicKey(String),
    #[error("Invalid signature")]
    InvalidSignature,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError>;
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;
}

/// Raw signature primitive.
///
/// Public keys are SEC1 encoded points, signatures are the fixed-size
/// `r || s` representation used by JWS.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    fn sign(&self, input: &[u8], private_key: &SecretSlice<u8>) -> Result<Vec<u8>, SignerError>;
    fn verify(&self, input: &[u8], signature: &[u8], public_key: &[u8])
    -> Result<(), SignerError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CryptoProvider: Send + Sync {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError>;

    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError>;
}

#[derive(Clone)]
pub struct CryptoProviderImpl {
    hashers: HashMap<String, Arc<dyn Hasher>>,
    signers: HashMap<String, Arc<dyn Signer>>,
}

impl CryptoProviderImpl {
    pub fn new(
        hashers: HashMap<String, Arc<dyn Hasher>>,
        signers: HashMap<String, Arc<dyn Signer>>,
    ) -> Self {
        Self { hashers, signers }
    }
}

impl CryptoProvider for CryptoProviderImpl {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError> {
        Ok(self
            .hashers
            .get(hasher)
            .ok_or(CryptoProviderError::MissingHasher(hasher.to_owned()))?
            .clone())
    }

    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError> {
        Ok(self
            .signers
            .get(signer)
            .ok_or(CryptoProviderError::MissingSigner(signer.to_owned()))?
            .clone())
    }
}
