use rstest::rstest;
use similar_asserts::assert_eq;

use crate::utils::context::TestContext;

#[rstest]
#[case("/api/v1/.well-known/openid-credential-issuer")]
#[case("/.well-known/openid-credential-issuer")]
#[tokio::test]
async fn test_get_issuer_metadata(#[case] url: &str) {
    let context = TestContext::new().await;

    let resp = context.api.oid4vci.issuer_metadata(url).await;

    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;
    assert_eq!(body["credential_issuer"], context.issuer_url);
    assert_eq!(
        body["credential_endpoint"],
        format!("{}/api/v1/credential", context.issuer_url)
    );
    assert_eq!(
        body["credential_configurations_supported"]["university_example_sd_jwt"]["format"],
        "vc+sd-jwt"
    );
    assert_eq!(body["display"][0]["name"], "Example University");
}

#[rstest]
#[case("/api/v1/.well-known/openid-configuration")]
#[case("/.well-known/openid-configuration")]
#[tokio::test]
async fn test_get_openid_configuration(#[case] url: &str) {
    let context = TestContext::new().await;

    let resp = context.api.oid4vci.openid_configuration(url).await;

    assert_eq!(resp.status(), 200);
    let body = resp.json_value().await;
    assert_eq!(body["issuer"], context.issuer_url);
    assert_eq!(
        body["token_endpoint"],
        format!("{}/api/v1/token", context.issuer_url)
    );
}
