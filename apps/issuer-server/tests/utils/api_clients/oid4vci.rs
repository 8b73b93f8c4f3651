use std::fmt::Display;

use issuer_core::service::oid4vci::dto::PRE_AUTHORIZED_CODE_GRANT_TYPE;
use serde_json::Value;

use super::{HttpClient, Response};

pub struct Oid4vciApi {
    client: HttpClient,
}

impl Oid4vciApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn token(&self, pre_authorized_code: impl Display) -> Response {
        let code = pre_authorized_code.to_string();
        self.client
            .post_form(
                "/api/v1/token",
                &[
                    ("grant_type", PRE_AUTHORIZED_CODE_GRANT_TYPE),
                    ("pre-authorized_code", &code),
                ],
            )
            .await
    }

    pub async fn token_with_form(&self, url: &str, form: &[(&str, &str)]) -> Response {
        self.client.post_form(url, form).await
    }

    pub async fn credential(&self, access_token: &str, body: Value) -> Response {
        self.credential_with_authorization(Some(&format!("Bearer {access_token}")), body)
            .await
    }

    pub async fn credential_with_authorization(
        &self,
        authorization: Option<&str>,
        body: Value,
    ) -> Response {
        self.client
            .post_json("/api/v1/credential", body.to_string(), authorization)
            .await
    }

    pub async fn credential_raw(&self, url: &str, access_token: &str, body: &str) -> Response {
        self.client
            .post_json(url, body.to_owned(), Some(&format!("Bearer {access_token}")))
            .await
    }

    pub async fn issuer_metadata(&self, url: &str) -> Response {
        self.client.get(url).await
    }

    pub async fn openid_configuration(&self, url: &str) -> Response {
        self.client.get(url).await
    }
}
