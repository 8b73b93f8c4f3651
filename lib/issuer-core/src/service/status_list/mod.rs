use std::sync::Arc;

use crate::repository::credential_offer_repository::CredentialOfferRepository;
use crate::repository::status_list_repository::StatusListRepository;

pub mod service;

#[derive(Clone)]
pub struct StatusListService {
    credential_offer_repository: Arc<dyn CredentialOfferRepository>,
    status_list_repository: Arc<dyn StatusListRepository>,
}

impl StatusListService {
    pub(crate) fn new(
        credential_offer_repository: Arc<dyn CredentialOfferRepository>,
        status_list_repository: Arc<dyn StatusListRepository>,
    ) -> Self {
        Self {
            credential_offer_repository,
            status_list_repository,
        }
    }
}
