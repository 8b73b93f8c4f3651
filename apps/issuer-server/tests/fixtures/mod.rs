use std::path::Path;

use issuer_core::config::core_config::AppConfig;
use issuer_core::proto::jwt::Jwt;
use issuer_core::proto::jwt::model::{JWTHeader, JWTPayload};
use issuer_crypto::Signer;
use issuer_crypto::signer::es256::{ES256Signer, KeyPair};
use issuer_crypto::utilities::get_rng;
use issuer_server::ServerConfig;
use serde_json::{Value, json};
use sql_data_provider::DbConn;
use time::OffsetDateTime;

pub const PROOF_TYPE: &str = "openid4vci-proof+jwt";

pub fn create_config(base_url: &str) -> AppConfig<ServerConfig> {
    let issuer_key = p256::SecretKey::random(&mut get_rng()).to_jwk_string();
    let resources = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources");

    let config = indoc::formatdoc!(
        r#"
            issuance:
              tokenTtl: 600
              metadataFile: "{metadata}"
              openidFile: "{openid}"
              templateReplacement:
                external-url: "{base_url}"
                metadata-version: "1.0"
            issuerKey:
              keyId: test-issuer-key
              privateJwk: '{issuer_key}'
            app:
              databaseUrl: "sqlite::memory:"
              traceLevel: "debug"
              enableMetrics: true
              enableOpenApi: true
        "#,
        metadata = resources.join("issuer_metadata.json").display(),
        openid = resources.join("openid.json").display(),
        base_url = base_url,
        issuer_key = issuer_key.as_str(),
    );

    AppConfig::from_yaml([config]).unwrap()
}

pub async fn create_db() -> DbConn {
    sql_data_provider::db_conn("sqlite::memory:", true)
        .await
        .unwrap()
}

pub fn holder_jwk(holder: &KeyPair) -> Value {
    serde_json::to_value(ES256Signer::bytes_as_jwk(&holder.public).unwrap()).unwrap()
}

pub fn proof_header(holder: &KeyPair) -> JWTHeader {
    JWTHeader {
        algorithm: Some("ES256".to_string()),
        key_id: None,
        r#type: Some(PROOF_TYPE.to_string()),
        jwk: Some(holder_jwk(holder)),
    }
}

pub fn proof_payload(audience: &str, nonce: &str) -> JWTPayload<Value> {
    JWTPayload {
        issued_at: Some(OffsetDateTime::now_utc()),
        audience: Some(vec![audience.to_string()]),
        custom: json!({ "nonce": nonce }),
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

/// Key proof accepted for an offer with the given nonce
pub fn proof_jwt(holder: &KeyPair, audience: &str, nonce: &str) -> String {
    sign_proof(holder, proof_header(holder), proof_payload(audience, nonce))
}

pub fn credential_request(format: &str, proof_jwt: Option<&str>) -> Value {
    let mut request = json!({ "format": format });
    if let Some(jwt) = proof_jwt {
        request["proof"] = json!({ "proof_type": "jwt", "jwt": jwt });
    }
    request
}

/// Issuer-signed payload of an SD-JWT VC, disclosures are dropped
pub fn issuer_jwt_payload(sd_jwt: &str) -> Value {
    let issuer_jwt = sd_jwt.split('~').next().unwrap();
    let decomposed = Jwt::<Value>::decompose_token(issuer_jwt).unwrap();
    serde_json::to_value(decomposed.payload).unwrap()
}
