use shared_types::{CredentialOfferId, StatusListId};

use super::StatusListService;
use crate::model::credential_offer::{CredentialOfferRelations, CredentialOfferStateEnum};
use crate::model::status_list::{
    StatusList, StatusListRelations, StatusListSlot, StatusListSlotRelations,
};
use crate::repository::error::DataLayerError;
use crate::service::error::{EntityNotFoundError, ServiceError, ValidationError};

impl StatusListService {
    pub async fn get_status_list(&self, id: &StatusListId) -> Result<StatusList, ServiceError> {
        self.status_list_repository
            .get_status_list(id, &StatusListRelations::default())
            .await?
            .ok_or_else(|| EntityNotFoundError::StatusList(*id).into())
    }

    /// Reserves the next free index of the status list for the offer.
    ///
    /// Indices are handed out by the storage layer, concurrent calls never share one.
    pub async fn link_status_list(
        &self,
        credential_offer_id: &CredentialOfferId,
        status_list_id: &StatusListId,
    ) -> Result<StatusListSlot, ServiceError> {
        let offer = self
            .credential_offer_repository
            .get_credential_offer(
                credential_offer_id,
                &CredentialOfferRelations {
                    status_list_slots: Some(StatusListSlotRelations::default()),
                },
            )
            .await?
            .ok_or(EntityNotFoundError::CredentialOffer(*credential_offer_id))?;

        if offer.state != CredentialOfferStateEnum::Offered {
            return Err(ValidationError::CredentialOfferNotLinkable {
                id: offer.id,
                state: offer.state,
            }
            .into());
        }

        // a reserved index cannot be handed back
        if offer
            .status_list_slots
            .iter()
            .flatten()
            .any(|slot| slot.status_list_id == *status_list_id)
        {
            return Err(ValidationError::StatusListAlreadyLinked(offer.id).into());
        }

        let status_list = self.get_status_list(status_list_id).await?;

        let index = match self.status_list_repository.allocate_index(&status_list.id).await {
            Ok(index) => index,
            Err(DataLayerError::RecordNotUpdated) => {
                return Err(EntityNotFoundError::StatusList(status_list.id).into());
            }
            Err(error) => return Err(error.into()),
        };

        let slot = StatusListSlot {
            credential_offer_id: offer.id,
            status_list_id: status_list.id,
            index,
            status_list: Some(status_list),
        };

        match self
            .status_list_repository
            .create_status_list_slot(slot.clone())
            .await
        {
            Ok(()) => {}
            Err(DataLayerError::AlreadyExists) => {
                return Err(ValidationError::StatusListAlreadyLinked(offer.id).into());
            }
            Err(error) => return Err(error.into()),
        }

        tracing::info!(
            "Reserved index {index} of status list {} for credential offer {}",
            slot.status_list_id,
            slot.credential_offer_id
        );

        Ok(slot)
    }
}
