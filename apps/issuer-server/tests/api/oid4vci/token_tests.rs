use issuer_core::model::credential_offer::CredentialOfferStateEnum;
use issuer_core::service::oid4vci::dto::PRE_AUTHORIZED_CODE_GRANT_TYPE;
use similar_asserts::assert_eq;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::utils::context::TestContext;
use crate::utils::db_clients::credential_offers::TestingOfferParams;

#[tokio::test]
async fn test_create_token_success() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;

    // WHEN
    let resp = context.api.oid4vci.token(offer.id).await;

    // THEN
    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 600);
    assert_eq!(body["c_nonce"], offer.nonce.to_string());
    let access_token: Uuid = body["access_token"].as_str().unwrap().parse().unwrap();

    let offer = context.db.credential_offers.get(&offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::InProgress);
    assert_eq!(offer.access_token, Some(access_token));
    assert!(offer.token_expiration_timestamp.is_some());
    assert!(offer.offer_data.is_some());
}

#[tokio::test]
async fn test_create_token_on_unversioned_route_without_grant_type() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    let code = offer.id.to_string();

    // WHEN
    let resp = context
        .api
        .oid4vci
        .token_with_form("/token", &[("pre-authorized_code", &code)])
        .await;

    // THEN
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_create_token_twice_fails() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    assert_eq!(context.api.oid4vci.token(offer.id).await.status(), 200);

    // WHEN
    let resp = context.api.oid4vci.token(offer.id).await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_grant");
    assert_eq!(body["error_description"], "Credential has already been used");
}

#[tokio::test]
async fn test_create_token_concurrent_redemptions_single_winner() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;

    // WHEN
    let requests = (0..5).map(|_| context.api.oid4vci.token(offer.id));
    let statuses: Vec<u16> = futures::future::join_all(requests)
        .await
        .iter()
        .map(|resp| resp.status())
        .collect();

    // THEN
    assert_eq!(1, statuses.iter().filter(|status| **status == 200).count());
    assert_eq!(4, statuses.iter().filter(|status| **status == 400).count());
}

#[tokio::test]
async fn test_create_token_unknown_code() {
    let context = TestContext::new().await;

    let resp = context.api.oid4vci.token(Uuid::new_v4()).await;

    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_grant");
    assert_eq!(body["error_description"], "Invalid preAuthCode");
}

#[tokio::test]
async fn test_create_token_code_not_a_uuid() {
    let context = TestContext::new().await;

    let resp = context.api.oid4vci.token("not-a-uuid").await;

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error"], "invalid_request");
}

#[tokio::test]
async fn test_create_token_wrong_grant_type() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams::default())
        .await;
    let code = offer.id.to_string();

    // WHEN
    let resp = context
        .api
        .oid4vci
        .token_with_form(
            "/api/v1/token",
            &[
                ("grant_type", "authorization_code"),
                ("pre-authorized_code", &code),
            ],
        )
        .await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(
        body["error_description"],
        format!("Grant type must be {PRE_AUTHORIZED_CODE_GRANT_TYPE}")
    );

    // the offer is untouched
    let offer = context.db.credential_offers.get(&offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::Offered);
}

#[tokio::test]
async fn test_create_token_missing_code() {
    let context = TestContext::new().await;

    let resp = context
        .api
        .oid4vci
        .token_with_form(
            "/api/v1/token",
            &[("grant_type", PRE_AUTHORIZED_CODE_GRANT_TYPE)],
        )
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.json_value().await["error"], "invalid_request");
}

#[tokio::test]
async fn test_create_token_expired_offer() {
    // GIVEN
    let context = TestContext::new().await;
    let offer = context
        .db
        .credential_offers
        .create(TestingOfferParams {
            offer_expiration_timestamp: OffsetDateTime::now_utc() - Duration::minutes(1),
            ..Default::default()
        })
        .await;

    // WHEN
    let resp = context.api.oid4vci.token(offer.id).await;

    // THEN
    assert_eq!(resp.status(), 400);
    let body = resp.json_value().await;
    assert_eq!(body["error"], "invalid_grant");
    assert_eq!(body["error_description"], "Credential has already been used");

    let offer = context.db.credential_offers.get(&offer.id).await;
    assert_eq!(offer.state, CredentialOfferStateEnum::Expired);
    assert_eq!(offer.offer_data, None);
    assert_eq!(offer.access_token, None);
}
