use std::sync::Arc;

pub mod credential_offer_repository;
pub mod error;
pub mod status_list_repository;

use credential_offer_repository::CredentialOfferRepository;
use status_list_repository::StatusListRepository;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait DataRepository: Send + Sync {
    fn get_credential_offer_repository(&self) -> Arc<dyn CredentialOfferRepository>;
    fn get_status_list_repository(&self) -> Arc<dyn StatusListRepository>;
}
