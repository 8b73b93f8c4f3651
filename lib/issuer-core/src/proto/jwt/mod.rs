//! Compact JWS encoding and decoding shared by proof validation and credential signing.

use std::fmt::Debug;

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use self::mapper::{bin_to_b64url_string, string_to_b64url_string};
use self::model::{DecomposedToken, JWTHeader, JWTPayload};

pub mod mapper;
pub mod model;


#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Could not extract token: `{0}`")]
    CouldNotExtract(String),
    #[error("Could not format token: `{0}`")]
    CouldNotFormat(String),
    #[error("Could not sign token: `{0}`")]
    CouldNotSign(String),
}

/// Receives the signing input and returns the raw signature
pub type AuthenticationFn<'a> = Box<dyn FnOnce(&[u8]) -> Result<Vec<u8>, String> + 'a>;

#[derive(Debug)]
pub struct Jwt<Payload> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        r#type: String,
        algorithm: String,
        key_id: Option<String>,
        payload: JWTPayload<Payload>,
    ) -> Jwt<Payload> {
        let header = JWTHeader {
            algorithm: Some(algorithm),
            key_id,
            r#type: Some(r#type),
            jwk: None,
        };

        Jwt { header, payload }
    }

    pub fn tokenize(&self, auth_fn: AuthenticationFn) -> Result<String, JwtError> {
        let jwt_header_json = serde_json::to_string(&self.header)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
        let payload_json = serde_json::to_string(&self.payload)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
        let mut token = format!(
            "{}.{}",
            string_to_b64url_string(&jwt_header_json)?,
            string_to_b64url_string(&payload_json)?,
        );

        let signature = auth_fn(token.as_bytes()).map_err(JwtError::CouldNotSign)?;
        let signature_encoded = bin_to_b64url_string(&signature)?;

        token.push('.');
        token.push_str(&signature_encoded);

        Ok(token)
    }

    /// Splits and decodes a compact JWS without checking the signature.
    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, JwtError> {
        let token = token.trim_matches(|c: char| c == '.' || c.is_whitespace());
        let mut jwt_parts = token.splitn(3, '.');

        let (Some(header), Some(payload), Some(signature)) =
            (jwt_parts.next(), jwt_parts.next(), jwt_parts.next())
        else {
            return Err(JwtError::CouldNotExtract("Missing token part".to_owned()));
        };

        let header_decoded = Base64UrlSafeNoPadding::decode_to_vec(header, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;
        let header_parsed: JWTHeader = serde_json::from_slice(&header_decoded)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        let payload_decoded = Base64UrlSafeNoPadding::decode_to_vec(payload, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;
        let payload_parsed: JWTPayload<Payload> = serde_json::from_slice(&payload_decoded)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        let signature = Base64UrlSafeNoPadding::decode_to_vec(signature, None)
            .map_err(|e| JwtError::CouldNotExtract(e.to_string()))?;

        Ok(DecomposedToken {
            header: header_parsed,
            payload: payload_parsed,
            signature,
            unverified_jwt: format!("{header}.{payload}"),
        })
    }
}
