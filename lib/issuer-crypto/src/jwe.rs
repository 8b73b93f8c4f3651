//! Compact JWE with direct ECDH-ES key agreement and A256GCM content encryption
//! (RFC 7516, RFC 7518 section 4.6).

use std::str::FromStr;

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::{AeadCore, AeadInPlace, Aes256Gcm, KeyInit};
use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use p256::NistP256;
use p256::ecdh::{EphemeralSecret, diffie_hellman};
use p256::elliptic_curve::JwkEcKey;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::signer::es256::ES256Signer;

pub const JWE_ALGORITHM: &str = "ECDH-ES";
pub const JWE_ENCRYPTION: &str = "A256GCM";

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("crypto error: {0}")]
    Crypto(String),
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Header {
    pub key_id: Option<String>,
    // apu param
    // these are raw(!) bytes, _not_ base64
    pub agreement_partyuinfo: String,
    // apv param
    // these are raw(!) bytes, _not_ base64
    pub agreement_partyvinfo: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
struct ProtectedHeader<T> {
    alg: String,
    enc: String,
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    key_id: Option<String>,
    #[serde(rename = "apu", default, skip_serializing_if = "Option::is_none")]
    agreement_partyuinfo: Option<String>,
    #[serde(rename = "apv", default, skip_serializing_if = "Option::is_none")]
    agreement_partyvinfo: Option<String>,
    #[serde(rename = "epk")]
    ephemeral_public_key: T,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RemoteJwk {
    pub kty: String,
    pub crv: String,
    pub x: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl TryFrom<JwkEcKey> for RemoteJwk {
    type Error = EncryptionError;

    fn try_from(value: JwkEcKey) -> Result<Self, Self::Error> {
        let point = value.to_encoded_point::<NistP256>().map_err(|e| {
            EncryptionError::Crypto(format!("failed to convert JWK to encoded point: {e}"))
        })?;
        let x = Base64UrlSafeNoPadding::encode_to_string(
            point
                .x()
                .ok_or(EncryptionError::Crypto("missing x coordinate".to_string()))?,
        )
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode x coordinate: {e}")))?;
        let y = Base64UrlSafeNoPadding::encode_to_string(
            point
                .y()
                .ok_or(EncryptionError::Crypto("missing y coordinate".to_string()))?,
        )
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode y coordinate: {e}")))?;
        Ok(Self {
            kty: "EC".to_string(),
            crv: value.crv().to_string(),
            x,
            y: Some(y),
        })
    }
}

/// Encrypts `payload` for the holder of `recipient_jwk` (P-256).
pub fn build_jwe(
    payload: &[u8],
    header: Header,
    recipient_jwk: &RemoteJwk,
) -> Result<String, EncryptionError> {
    let recipient_public_key = ES256Signer::public_key_from_jwk(recipient_jwk)
        .map_err(|e| EncryptionError::Crypto(format!("invalid recipient key: {e}")))?;
    let recipient_public_key = p256::PublicKey::from_sec1_bytes(&recipient_public_key)
        .map_err(|e| EncryptionError::Crypto(format!("invalid recipient key: {e}")))?;

    let ephemeral_secret = EphemeralSecret::random(&mut ChaCha20Rng::from_entropy());
    let ephemeral_public_key: RemoteJwk = ephemeral_secret.public_key().to_jwk().try_into()?;
    let shared_secret = ephemeral_secret.diffie_hellman(&recipient_public_key);
    let shared_secret = Zeroizing::new(shared_secret.raw_secret_bytes().to_vec());

    let protected_header = ProtectedHeader {
        alg: JWE_ALGORITHM.to_string(),
        enc: JWE_ENCRYPTION.to_string(),
        key_id: header.key_id.to_owned(),
        agreement_partyuinfo: encode_optional(&header.agreement_partyuinfo, "apu")?,
        agreement_partyvinfo: encode_optional(&header.agreement_partyvinfo, "apv")?,
        ephemeral_public_key,
    };
    let protected_header_bytes = serde_json::to_vec(&protected_header).map_err(|e| {
        EncryptionError::Crypto(format!("failed to serialize protected JWE header: {e}"))
    })?;
    let protected_header_b64 = Base64UrlSafeNoPadding::encode_to_string(protected_header_bytes)
        .map_err(|e| {
            EncryptionError::Crypto(format!("failed to encode protected JWE header: {e}"))
        })?;

    let encryption_key = derive_encryption_key_aes256gcm(
        &shared_secret,
        header.agreement_partyuinfo.as_bytes(),
        header.agreement_partyvinfo.as_bytes(),
    )?;

    let nonce = Aes256Gcm::generate_nonce(&mut ChaCha20Rng::from_entropy());
    let mut encrypted = payload.to_vec();
    let cipher = Aes256Gcm::new(GenericArray::from_slice(&*encryption_key));
    let tag = cipher
        .encrypt_in_place_detached(&nonce, protected_header_b64.as_bytes(), &mut encrypted)
        .map_err(|e| EncryptionError::Crypto(format!("Failed to encrypt JWE: {e}")))?;

    let nonce_b64 = Base64UrlSafeNoPadding::encode_to_string(nonce)
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode JWE nonce: {e}")))?;
    let encrypted_b64 = Base64UrlSafeNoPadding::encode_to_string(encrypted)
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode JWE payload: {e}")))?;
    let tag_b64 = Base64UrlSafeNoPadding::encode_to_string(tag)
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode JWE tag: {e}")))?;

    Ok([
        protected_header_b64,
        "".to_string(),
        nonce_b64,
        encrypted_b64,
        tag_b64,
    ]
    .join("."))
}

/// Decrypts a JWE produced by [`build_jwe`] with the recipient's private P-256 JWK.
pub fn decrypt_jwe_payload(
    jwe: &str,
    private_jwk: Zeroizing<String>,
) -> Result<Vec<u8>, EncryptionError> {
    let encrypted_jwe = EncryptedJWE::from_str(jwe)?;
    encrypted_jwe.decrypt(private_jwk)
}

struct EncryptedJWE {
    protected_header_b64: String,
    protected_header: Vec<u8>,
    nonce: Vec<u8>,
    payload: Vec<u8>,
    tag: Vec<u8>,
}

impl EncryptedJWE {
    fn decrypt(&self, private_key_jwk: Zeroizing<String>) -> Result<Vec<u8>, EncryptionError> {
        let header: ProtectedHeader<JwkEcKey> = serde_json::from_slice(&self.protected_header)
            .map_err(|e| EncryptionError::Crypto(format!("Failed to parse JWE header: {e}")))?;
        if header.alg != JWE_ALGORITHM || header.enc != JWE_ENCRYPTION {
            return Err(EncryptionError::Crypto(format!(
                "Unsupported JWE alg `{}` / enc `{}`",
                header.alg, header.enc
            )));
        }

        let private_key_jwk: JwkEcKey = serde_json::from_str(&private_key_jwk)
            .map_err(|e| EncryptionError::Crypto(format!("Failed to parse JWK: {e}")))?;
        let secret_key = private_key_jwk.to_secret_key::<NistP256>().map_err(|e| {
            EncryptionError::Crypto(format!("Failed to decode JWK to secret key: {e}"))
        })?;
        let peer_pub_key: p256::PublicKey =
            header.ephemeral_public_key.to_public_key().map_err(|e| {
                EncryptionError::Crypto(format!("Failed to decode JWK to public key: {e}"))
            })?;

        let shared_secret = Zeroizing::new(
            diffie_hellman(secret_key.to_nonzero_scalar(), peer_pub_key.as_affine())
                .raw_secret_bytes()
                .to_vec(),
        );

        let apu = decode_optional(header.agreement_partyuinfo.as_deref(), "apu")?;
        let apv = decode_optional(header.agreement_partyvinfo.as_deref(), "apv")?;
        let encryption_key = derive_encryption_key_aes256gcm(&shared_secret, &apu, &apv)?;

        let cipher = Aes256Gcm::new(GenericArray::from_slice(&*encryption_key));
        let mut plaintext = self.payload.clone();
        cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(&self.nonce),
                self.protected_header_b64.as_bytes(),
                &mut plaintext,
                GenericArray::from_slice(&self.tag),
            )
            .map_err(|e| EncryptionError::Crypto(format!("Failed to decrypt JWE: {e}")))?;
        Ok(plaintext)
    }
}

impl FromStr for EncryptedJWE {
    type Err = EncryptionError;

    fn from_str(jwe: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = jwe.split('.').collect();
        let [header, _encrypted_key, nonce, payload, tag] = parts[..] else {
            return Err(EncryptionError::Crypto(format!(
                "Invalid JWE, expected 5 parts, got {}",
                parts.len()
            )));
        };

        let nonce = decode_b64(nonce, "nonce")?;
        if nonce.len() != 12 {
            return Err(EncryptionError::Crypto("Invalid JWE nonce length".to_string()));
        }
        let tag = decode_b64(tag, "tag")?;
        if tag.len() != 16 {
            return Err(EncryptionError::Crypto("Invalid JWE tag length".to_string()));
        }

        Ok(Self {
            protected_header_b64: header.to_owned(),
            protected_header: decode_b64(header, "header")?,
            nonce,
            payload: decode_b64(payload, "payload")?,
            tag,
        })
    }
}

fn derive_encryption_key_aes256gcm(
    shared_secret: &[u8],
    apu: &[u8],
    apv: &[u8],
) -> Result<Zeroizing<[u8; 32]>, EncryptionError> {
    const ALG: &[u8] = JWE_ENCRYPTION.as_bytes();
    const KEY_LENGTH: u32 = 256;

    let mut other_info = vec![];
    other_info.extend((ALG.len() as u32).to_be_bytes());
    other_info.extend(ALG);
    other_info.extend((apu.len() as u32).to_be_bytes());
    other_info.extend(apu);
    other_info.extend((apv.len() as u32).to_be_bytes());
    other_info.extend(apv);
    other_info.extend(KEY_LENGTH.to_be_bytes());

    let mut encryption_key = Zeroizing::new([0; 32]);
    concat_kdf::derive_key_into::<sha2::Sha256>(shared_secret, &other_info, &mut *encryption_key)
        .map_err(|e| EncryptionError::Crypto(format!("Failed to derive encryption key: {e}")))?;
    Ok(encryption_key)
}

fn encode_optional(value: &str, name: &str) -> Result<Option<String>, EncryptionError> {
    if value.is_empty() {
        return Ok(None);
    }

    Base64UrlSafeNoPadding::encode_to_string(value)
        .map(Some)
        .map_err(|e| EncryptionError::Crypto(format!("failed to encode {name}: {e}")))
}

fn decode_optional(value: Option<&str>, name: &str) -> Result<Vec<u8>, EncryptionError> {
    match value {
        Some(value) => decode_b64(value, name),
        None => Ok(vec![]),
    }
}

pub(crate) fn decode_b64(base64_input: &str, name: &str) -> Result<Vec<u8>, EncryptionError> {
    Base64UrlSafeNoPadding::decode_to_vec(base64_input, None)
        .map_err(|err| EncryptionError::Crypto(format!("failed to decode {name}: {err}")))
}
