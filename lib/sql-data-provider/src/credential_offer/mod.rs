use std::sync::Arc;

use issuer_core::repository::status_list_repository::StatusListRepository;
use sea_orm::DatabaseConnection;

pub mod mapper;
pub mod repository;

pub(crate) struct CredentialOfferProvider {
    pub db: DatabaseConnection,
    pub status_list_repository: Arc<dyn StatusListRepository>,
}
