use std::collections::HashMap;
use std::sync::Arc;

use issuer_crypto::hasher::sha256::SHA256;
use issuer_crypto::signer::es256::{ES256Signer, KeyPair};
use issuer_crypto::{CryptoProviderImpl, Hasher, Signer};
use serde_json::{Value, json};
use shared_types::CredentialOfferId;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::model::credential_offer::{CredentialOffer, CredentialOfferStateEnum};
use crate::proto::jwt::Jwt;
use crate::proto::jwt::model::{JWTHeader, JWTPayload};
use crate::proto::proof_validator::model::PROOF_JWT_TYPE;

pub const ISSUER_ID: &str = "https://issuer.example.com";

pub fn crypto_provider() -> CryptoProviderImpl {
    CryptoProviderImpl::new(
        HashMap::from_iter([("sha-256".to_string(), Arc::new(SHA256) as Arc<dyn Hasher>)]),
        HashMap::from_iter([("ES256".to_string(), Arc::new(ES256Signer) as Arc<dyn Signer>)]),
    )
}

pub fn dummy_offer(state: CredentialOfferStateEnum) -> CredentialOffer {
    let now = OffsetDateTime::now_utc();
    let has_token = matches!(
        state,
        CredentialOfferStateEnum::InProgress | CredentialOfferStateEnum::Issued
    );
    let has_data = matches!(
        state,
        CredentialOfferStateEnum::Offered | CredentialOfferStateEnum::InProgress
    );

    CredentialOffer {
        id: CredentialOfferId::new_v4(),
        created_date: now,
        last_modified: now,
        state,
        credential_configuration_ids: vec!["university_example_sd_jwt".to_string()],
        offer_data: has_data.then(|| {
            json!({
                "data": {
                    "name": "Data Science",
                    "type": "Bachelor of Science",
                    "average_grade": 5.33
                }
            })
        }),
        credential_metadata: None,
        access_token: has_token.then(Uuid::new_v4),
        token_expiration_timestamp: has_token.then(|| now + Duration::minutes(10)),
        nonce: Uuid::new_v4(),
        offer_expiration_timestamp: now + Duration::days(30),
        credential_valid_from: None,
        credential_valid_until: None,
        status_list_slots: None,
    }
}

/// Header with the holder key embedded as `jwk`
pub fn proof_header(holder: &KeyPair) -> JWTHeader {
    let jwk = ES256Signer::bytes_as_jwk(&holder.public).unwrap();

    JWTHeader {
        algorithm: Some("ES256".to_string()),
        key_id: None,
        r#type: Some(PROOF_JWT_TYPE.to_string()),
        jwk: Some(serde_json::to_value(jwk).unwrap()),
    }
}

pub fn proof_payload(nonce: &Uuid) -> JWTPayload<Value> {
    JWTPayload {
        issued_at: Some(OffsetDateTime::now_utc()),
        audience: Some(vec![ISSUER_ID.to_string()]),
        custom: json!({ "nonce": nonce.to_string() }),
        ..Default::default()
    }
}

pub fn sign_proof(holder: &KeyPair, header: JWTHeader, payload: JWTPayload<Value>) -> String {
    Jwt { header, payload }
        .tokenize(Box::new(|input| {
            ES256Signer
                .sign(input, &holder.private)
                .map_err(|e| e.to_string())
        }))
        .unwrap()
}

pub fn valid_proof(holder: &KeyPair, nonce: &Uuid) -> String {
    sign_proof(holder, proof_header(holder), proof_payload(nonce))
}
