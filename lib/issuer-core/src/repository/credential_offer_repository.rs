use shared_types::CredentialOfferId;
use uuid::Uuid;

use super::error::DataLayerError;
use crate::model::credential_offer::{
    CredentialOffer, CredentialOfferRelations, CredentialOfferStateEnum,
    UpdateCredentialOfferRequest,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait CredentialOfferRepository: Send + Sync {
    async fn create_credential_offer(
        &self,
        request: CredentialOffer,
    ) -> Result<CredentialOfferId, DataLayerError>;

    async fn get_credential_offer(
        &self,
        id: &CredentialOfferId,
        relations: &CredentialOfferRelations,
    ) -> Result<Option<CredentialOffer>, DataLayerError>;

    async fn get_credential_offer_by_access_token(
        &self,
        access_token: &Uuid,
        relations: &CredentialOfferRelations,
    ) -> Result<Option<CredentialOffer>, DataLayerError>;

    /// Applies `request` only if the stored state still equals `expected_state`.
    ///
    /// Fails with [`DataLayerError::RecordNotUpdated`] when another writer moved
    /// the offer first (or the offer does not exist).
    async fn compare_and_transition(
        &self,
        id: &CredentialOfferId,
        expected_state: CredentialOfferStateEnum,
        request: UpdateCredentialOfferRequest,
    ) -> Result<(), DataLayerError>;
}
