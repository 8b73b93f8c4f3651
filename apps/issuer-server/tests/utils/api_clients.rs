use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use self::oid4vci::Oid4vciApi;
use self::other::OtherApi;

pub mod oid4vci;
pub mod other;

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| reqwest::ClientBuilder::new().build().unwrap())
}

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
}

impl HttpClient {
    pub async fn get(&self, url: &str) -> Response {
        let url = format!("{}{url}", self.base_url);

        let resp = http_client().get(url).send().await.unwrap();

        Response { resp }
    }

    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Response {
        let url = format!("{}{url}", self.base_url);

        let resp = http_client().post(url).form(form).send().await.unwrap();

        Response { resp }
    }

    /// Posts a raw body as `application/json` with an optional `Authorization` header
    pub async fn post_json(&self, url: &str, body: String, authorization: Option<&str>) -> Response {
        let url = format!("{}{url}", self.base_url);

        let mut request = http_client()
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(authorization) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }

        Response {
            resp: request.send().await.unwrap(),
        }
    }
}

pub struct Response {
    resp: reqwest::Response,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.resp.status().into()
    }

    pub fn content_type(&self) -> Option<String> {
        self.resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }

    pub async fn text(self) -> String {
        self.resp.text().await.unwrap()
    }

    pub async fn json<T: DeserializeOwned>(self) -> T {
        let full = self.resp.bytes().await.unwrap();
        serde_json::from_slice(&full).unwrap()
    }

    pub async fn json_value(self) -> Value {
        self.json().await
    }
}

pub struct Client {
    pub oid4vci: Oid4vciApi,
    pub other: OtherApi,
}

impl Client {
    pub fn new(base_url: String) -> Self {
        let client = HttpClient { base_url };

        Self {
            oid4vci: Oid4vciApi::new(client.clone()),
            other: OtherApi::new(client),
        }
    }
}
