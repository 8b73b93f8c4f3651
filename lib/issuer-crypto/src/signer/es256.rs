use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use p256::{EncodedPoint, FieldBytes, NistP256};
use p256::ecdsa::signature::{Signer as _, Verifier as _};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::JwkEcKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use secrecy::{ExposeSecret, SecretSlice};

use crate::jwe::RemoteJwk;
use crate::{Signer, SignerError};

pub struct ES256Signer;

pub struct KeyPair {
    pub public: Vec<u8>,
    pub private: SecretSlice<u8>,
}

impl ES256Signer {
    pub fn generate_key_pair() -> KeyPair {
        let signing_key = SigningKey::random(&mut crate::utilities::get_rng());
        let public = signing_key
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec();

        KeyPair {
            public,
            private: signing_key.to_bytes().to_vec().into(),
        }
    }

    /// Parses a private P-256 JWK (with `d`) into a key pair.
    pub fn parse_private_jwk(private_jwk: &str) -> Result<KeyPair, SignerError> {
        let jwk: JwkEcKey =
            serde_json::from_str(private_jwk).map_err(|_| SignerError::CouldNotExtractKeyPair)?;
        let secret_key = jwk
            .to_secret_key::<NistP256>()
            .map_err(|_| SignerError::CouldNotExtractKeyPair)?;

        Ok(KeyPair {
            public: secret_key
                .public_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            private: secret_key.to_bytes().to_vec().into(),
        })
    }

    pub fn parse_public_key_coordinates(x: &[u8], y: &[u8]) -> Result<Vec<u8>, SignerError> {
        if x.len() != 32 || y.len() != 32 {
            return Err(SignerError::CouldNotExtractPublicKey(
                "invalid coordinate length".to_string(),
            ));
        }

        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(x),
            FieldBytes::from_slice(y),
            false,
        );
        let key = VerifyingKey::from_encoded_point(&point)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;
        Ok(key.to_encoded_point(false).as_bytes().to_vec())
    }

    pub fn public_key_from_jwk(jwk: &RemoteJwk) -> Result<Vec<u8>, SignerError> {
        if jwk.kty != "EC" || jwk.crv != "P-256" {
            return Err(SignerError::CouldNotExtractPublicKey(format!(
                "unsupported key type {} {}",
                jwk.kty, jwk.crv
            )));
        }

        let x = Base64UrlSafeNoPadding::decode_to_vec(&jwk.x, None)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;
        let y = jwk
            .y
            .as_ref()
            .ok_or(SignerError::CouldNotExtractPublicKey(
                "Y is missing".to_string(),
            ))?;
        let y = Base64UrlSafeNoPadding::decode_to_vec(y, None)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;

        Self::parse_public_key_coordinates(&x, &y)
    }

    pub fn bytes_as_jwk(public_key: &[u8]) -> Result<RemoteJwk, SignerError> {
        let key = VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;
        let point = key.to_encoded_point(false);
        let x = point.x().ok_or(SignerError::CouldNotExtractPublicKey(
            "X is missing".to_string(),
        ))?;
        let y = point.y().ok_or(SignerError::CouldNotExtractPublicKey(
            "Y is missing".to_string(),
        ))?;

        Ok(RemoteJwk {
            kty: "EC".to_string(),
            crv: "P-256".to_string(),
            x: Base64UrlSafeNoPadding::encode_to_string(x)
                .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?,
            y: Some(
                Base64UrlSafeNoPadding::encode_to_string(y)
                    .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?,
            ),
        })
    }
}

impl Signer for ES256Signer {
    fn sign(&self, input: &[u8], private_key: &SecretSlice<u8>) -> Result<Vec<u8>, SignerError> {
        let signing_key = SigningKey::from_slice(private_key.expose_secret())
            .map_err(|_| SignerError::CouldNotExtractKeyPair)?;
        let signature: Signature = signing_key
            .try_sign(input)
            .map_err(|e| SignerError::CouldNotSign(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignerError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| SignerError::CouldNotExtractPublicKey(e.to_string()))?;
        let signature =
            Signature::from_slice(signature).map_err(|_| SignerError::InvalidSignature)?;

        verifying_key
            .verify(input, &signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}
