use super::{HttpClient, Response};

pub struct OtherApi {
    client: HttpClient,
}

impl OtherApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> Response {
        self.client.get("/health").await
    }

    pub async fn metrics(&self) -> Response {
        self.client.get("/metrics").await
    }

    pub async fn openapi(&self) -> Response {
        self.client.get("/api-docs/openapi.json").await
    }
}
