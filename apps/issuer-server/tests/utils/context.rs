use std::sync::Arc;

use issuer_core::IssuerCore;
use issuer_server::router::start_server;
use sql_data_provider::DataLayer;
use tokio::task::JoinHandle;

use super::api_clients::Client;
use super::db_clients::DbClient;
use crate::fixtures;

pub struct TestContext {
    pub db: DbClient,
    pub api: Client,
    /// Engine sharing the server database, for operations without an endpoint
    pub core: IssuerCore,
    /// Credential issuer identifier, the expected proof audience
    pub issuer_url: String,
    _handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let config = fixtures::create_config(&base_url);
        let db = fixtures::create_db().await;

        let core =
            IssuerCore::new(Arc::new(DataLayer::build(db.clone())), &config.core).unwrap();

        let _handle = tokio::spawn({
            let db = db.clone();
            async move { start_server(listener, config, db).await }
        });

        Self {
            db: DbClient::new(db),
            api: Client::new(base_url.to_owned()),
            core,
            issuer_url: base_url,
            _handle,
        }
    }
}
