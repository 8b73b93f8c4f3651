use issuer_core::model::credential_offer::{CredentialOffer, CredentialOfferStateEnum};
use issuer_crypto::jwe::{RemoteJwk, decrypt_jwe_payload};
use issuer_crypto::signer::es256::{ES256Signer, KeyPair};
use issuer_crypto::utilities::get_rng;
use serde_json::{Value, json};
use similar_asserts::assert_eq;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::fixtures::{
    credential_request, holder_jwk, issuer_jwt_payload, proof_header, proof_jwt, proof_payload,
    sign_proof,
};
use crate::utils::context::TestContext;
use crate::utils::db_clients::credential_offers::{TestingOfferParams, UNBOUND_CONFIGURATION};

const FORMAT: &str = "vc+sd-jwt";

struct RedeemedOffer {
    offer: CredentialOffer,
    access_token: String,
    c_nonce: String,
}

async fn redeemed_offer(context: &TestContext, params: TestingOfferParams) -> RedeemedOffer {
    let offer = context.db.credential_offers.create(params).await;

    let resp = context.api.oid4vci.token(offer.id).await;
    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;

    RedeemedOffer {
        offer,
        access_token: body["access_token"].as_str().unwrap().to_string(),
        c_nonce: body["c_nonce"].as_str().unwrap().to_string(),
    }
}

fn bound_request(context: &TestContext, holder: &KeyPair, redeemed: &RedeemedOffer) -> Value {
    let proof = proof_jwt(holder, &context.issuer_url, &redeemed.c_nonce);
    credential_request(FORMAT, Some(&proof))
}

#[tokio::test]
async fn test_credential_flow_success() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            bound_request(&context, &holder, &redeemed),
        )
        .await;

    // THEN
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.content_type().as_deref(), Some("application/json"));
    let body = resp.json_value().await;
    assert_eq!(body["format"], FORMAT);

    let credential = body["credential"].as_str().unwrap();
    let payload = issuer_jwt_payload(credential);
    assert_eq!(payload["iss"], context.issuer_url);
    assert_eq!(payload["vct"], format!("{}/vct/university", context.issuer_url));
    assert_eq!(payload["cnf"], holder_jwk(&holder));
    assert!(payload.get("status").is_none());
    // claims travel as disclosures only
    assert!(payload.get("name").is_none());
    assert!(credential.split('~').count() > 2);

    let offer = context.db.credential_offers.get(&redeemed.offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::Issued);
    assert_eq!(offer.offer_data, None);
}

#[tokio::test]
async fn test_credential_issued_only_once() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let request = bound_request(&context, &holder, &redeemed);

    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request.clone())
        .await;
    assert_eq!(resp.status(), 200);

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request)
        .await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_grant");
    assert!(
        body["error_description"]
            .as_str()
            .unwrap()
            .contains("ISSUED")
    );
}

#[tokio::test]
async fn test_credential_concurrent_requests_single_issuance() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let request = bound_request(&context, &holder, &redeemed);

    // WHEN
    let requests = (0..4).map(|_| {
        context
            .api
            .oid4vci
            .credential(&redeemed.access_token, request.clone())
    });
    let statuses: Vec<u16> = futures::future::join_all(requests)
        .await
        .iter()
        .map(|resp| resp.status())
        .collect();

    // THEN
    assert_eq!(1, statuses.iter().filter(|status| **status == 200).count());
    assert_eq!(3, statuses.iter().filter(|status| **status == 400).count());
}

#[tokio::test]
async fn test_credential_unbound_without_proof() {
    // GIVEN
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(
        &context,
        TestingOfferParams {
            credential_configuration_id: UNBOUND_CONFIGURATION,
            ..Default::default()
        },
    )
    .await;

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, credential_request(FORMAT, None))
        .await;

    // THEN
    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;
    assert_eq!(body["format"], FORMAT);
    let payload = issuer_jwt_payload(body["credential"].as_str().unwrap());
    assert!(payload.get("cnf").is_none());
}

#[tokio::test]
async fn test_credential_with_status_list() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let status_list = context.db.status_lists.create(100).await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    let slot = context
        .core
        .status_list_service
        .link_status_list(&offer.id, &status_list.id)
        .await
        .unwrap();
    assert_eq!(slot.index, 0);

    let resp = context.api.oid4vci.token(offer.id).await;
    let body = resp.json_value().await;
    let access_token = body["access_token"].as_str().unwrap();
    let proof = proof_jwt(
        &holder,
        &context.issuer_url,
        body["c_nonce"].as_str().unwrap(),
    );

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(access_token, credential_request(FORMAT, Some(&proof)))
        .await;

    // THEN
    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;
    let payload = issuer_jwt_payload(body["credential"].as_str().unwrap());
    assert_eq!(
        payload["status"]["status_list"],
        json!({
            "idx": 0,
            "uri": status_list.uri,
            "type": "SwissTokenStatusList-1.0"
        })
    );
}

#[tokio::test]
async fn test_link_status_list_twice_does_not_consume_index() {
    // GIVEN
    let context = TestContext::new().await;
    let status_list = context.db.status_lists.create(100).await;
    let first = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    let second = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    let service = &context.core.status_list_service;
    service
        .link_status_list(&first.id, &status_list.id)
        .await
        .unwrap();

    // WHEN
    let relink = service.link_status_list(&first.id, &status_list.id).await;

    // THEN
    assert!(relink.is_err());
    assert_eq!(
        context.db.status_lists.get(&status_list.id).await.next_free_index,
        1
    );
    let slot = service
        .link_status_list(&second.id, &status_list.id)
        .await
        .unwrap();
    assert_eq!(slot.index, 1);
}

#[tokio::test]
async fn test_credential_wrong_nonce() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let proof = proof_jwt(&holder, &context.issuer_url, &Uuid::new_v4().to_string());

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            credential_request(FORMAT, Some(&proof)),
        )
        .await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_proof");
    assert_eq!(
        body["error_description"],
        "Nonce claim does not match the server-provided c_nonce value"
    );

    // a rejected proof keeps the offer redeemable
    let offer = context.db.credential_offers.get(&redeemed.offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::InProgress);
}

#[tokio::test]
async fn test_credential_wrong_audience() {
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let proof = proof_jwt(&holder, "https://other.example.com", &redeemed.c_nonce);

    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            credential_request(FORMAT, Some(&proof)),
        )
        .await;

    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_proof");
    assert_eq!(body["error_description"], "Audience claim is missing or incorrect");
}

#[tokio::test]
async fn test_credential_wrong_proof_typ_header() {
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let mut header = proof_header(&holder);
    header.r#type = Some("JWT".to_string());
    let proof = sign_proof(
        &holder,
        header,
        proof_payload(&context.issuer_url, &redeemed.c_nonce),
    );

    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            credential_request(FORMAT, Some(&proof)),
        )
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error"], "invalid_proof");
}

#[tokio::test]
async fn test_credential_missing_proof_for_bound_offer() {
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, credential_request(FORMAT, None))
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error"], "invalid_proof");
}

#[tokio::test]
async fn test_credential_unsupported_proof_type() {
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            json!({
                "format": FORMAT,
                "proof": { "proof_type": "cwt", "cwt": "abc" }
            }),
        )
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error"], "invalid_proof");
}

#[tokio::test]
async fn test_credential_jwt_proof_without_jwt() {
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            json!({
                "format": FORMAT,
                "proof": { "proof_type": "jwt" }
            }),
        )
        .await;

    assert_eq!(resp.status(), 422);
    assert_eq!(
        resp.json_value().await["error"],
        "invalid_credential_request"
    );
}

#[tokio::test]
async fn test_credential_malformed_body() {
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let resp = context
        .api
        .oid4vci
        .credential_raw("/credential", &redeemed.access_token, r#"{"proof": 5"#)
        .await;

    assert_eq!(resp.status(), 422);
    assert_eq!(
        resp.json_value().await["error"],
        "invalid_credential_request"
    );
}

#[tokio::test]
async fn test_credential_wrong_format() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;
    let proof = proof_jwt(&holder, &context.issuer_url, &redeemed.c_nonce);

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(
            &redeemed.access_token,
            credential_request("jwt_vc_json", Some(&proof)),
        )
        .await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "unsupported_credential_format");
    assert_eq!(
        body["error_description"],
        "Mismatch between requested and offered format."
    );
}

#[tokio::test]
async fn test_credential_missing_authorization_header() {
    let context = TestContext::new().await;

    let resp = context
        .api
        .oid4vci
        .credential_with_authorization(None, credential_request(FORMAT, None))
        .await;

    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], "No authorization header found");
}

#[tokio::test]
async fn test_credential_non_bearer_authorization() {
    let context = TestContext::new().await;

    let resp = context
        .api
        .oid4vci
        .credential_with_authorization(
            Some("Basic dXNlcjpwYXNz"),
            credential_request(FORMAT, None),
        )
        .await;

    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], "No bearer token found");
}

#[tokio::test]
async fn test_credential_lowercase_bearer_scheme() {
    let context = TestContext::new().await;
    let redeemed = redeemed_offer(
        &context,
        TestingOfferParams {
            credential_configuration_id: UNBOUND_CONFIGURATION,
            ..Default::default()
        },
    )
    .await;

    let resp = context
        .api
        .oid4vci
        .credential_with_authorization(
            Some(&format!("bearer {}", redeemed.access_token)),
            credential_request(FORMAT, None),
        )
        .await;

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_credential_unknown_access_token() {
    let context = TestContext::new().await;

    let resp = context
        .api
        .oid4vci
        .credential(&Uuid::new_v4().to_string(), credential_request(FORMAT, None))
        .await;

    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], "Invalid accessToken");
}

#[tokio::test]
async fn test_credential_offer_expired_after_redeem() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(
        &context,
        TestingOfferParams {
            offer_expiration_timestamp: OffsetDateTime::now_utc() + Duration::seconds(2),
            ..Default::default()
        },
    )
    .await;
    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    // WHEN
    let request = bound_request(&context, &holder, &redeemed);
    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request.clone())
        .await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_grant");
    assert!(
        body["error_description"]
            .as_str()
            .unwrap()
            .contains("The current offer state is EXPIRED")
    );

    let offer = context.db.credential_offers.get(&redeemed.offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::Expired);
    assert_eq!(offer.offer_data, None);
    assert_eq!(offer.access_token, None);

    // the token is gone with the expired offer
    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request)
        .await;
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error_description"], "Invalid accessToken");
}

#[tokio::test]
async fn test_credential_encrypted_response() {
    // GIVEN
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let recipient = p256::SecretKey::random(&mut get_rng());
    let recipient_jwk = RemoteJwk::try_from(recipient.public_key().to_jwk()).unwrap();
    let mut request = bound_request(&context, &holder, &redeemed);
    request["credential_response_encryption"] = json!({
        "jwk": recipient_jwk,
        "alg": "ECDH-ES",
        "enc": "A256GCM"
    });

    // WHEN
    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request)
        .await;

    // THEN
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.content_type().as_deref(), Some("application/jwt"));
    let jwe = resp.text().await;
    assert_eq!(5, jwe.split('.').count());

    let decrypted = decrypt_jwe_payload(&jwe, recipient.to_jwk_string()).unwrap();
    let body: Value = serde_json::from_slice(&decrypted).unwrap();
    assert_eq!(body["format"], FORMAT);
    assert!(body["credential"].as_str().is_some());
}

#[tokio::test]
async fn test_credential_unsupported_encryption_parameters() {
    let context = TestContext::new().await;
    let holder = ES256Signer::generate_key_pair();
    let redeemed = redeemed_offer(&context, TestingOfferParams::default()).await;

    let recipient = p256::SecretKey::random(&mut get_rng());
    let recipient_jwk = RemoteJwk::try_from(recipient.public_key().to_jwk()).unwrap();
    let mut request = bound_request(&context, &holder, &redeemed);
    request["credential_response_encryption"] = json!({
        "jwk": recipient_jwk,
        "alg": "RSA-OAEP-256",
        "enc": "A128GCM"
    });

    let resp = context
        .api
        .oid4vci
        .credential(&redeemed.access_token, request)
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.json_value().await["error"],
        "invalid_encryption_parameters"
    );

    let offer = context.db.credential_offers.get(&redeemed.offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::InProgress);
}
