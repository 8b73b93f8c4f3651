use autometrics::autometrics;
use issuer_core::model::credential_offer::{
    CredentialOffer, CredentialOfferRelations, CredentialOfferStateEnum,
    UpdateCredentialOfferRequest,
};
use issuer_core::repository::credential_offer_repository::CredentialOfferRepository;
use issuer_core::repository::error::DataLayerError;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use shared_types::CredentialOfferId;
use time::OffsetDateTime;
use uuid::Uuid;

use super::CredentialOfferProvider;
use super::mapper::transition_active_model;
use crate::entity::credential_offer;
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

impl CredentialOfferProvider {
    async fn resolve_relations(
        &self,
        model: credential_offer::Model,
        relations: &CredentialOfferRelations,
    ) -> Result<CredentialOffer, DataLayerError> {
        let mut offer = CredentialOffer::try_from(model)?;

        if let Some(slot_relations) = &relations.status_list_slots {
            offer.status_list_slots = Some(
                self.status_list_repository
                    .get_status_list_slots(&offer.id, slot_relations)
                    .await?,
            );
        }

        Ok(offer)
    }
}

#[autometrics]
#[async_trait::async_trait]
impl CredentialOfferRepository for CredentialOfferProvider {
    async fn create_credential_offer(
        &self,
        request: CredentialOffer,
    ) -> Result<CredentialOfferId, DataLayerError> {
        let offer = credential_offer::ActiveModel::try_from(request)?
            .insert(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(offer.id)
    }

    async fn get_credential_offer(
        &self,
        id: &CredentialOfferId,
        relations: &CredentialOfferRelations,
    ) -> Result<Option<CredentialOffer>, DataLayerError> {
        let offer = credential_offer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        let Some(offer) = offer else {
            return Ok(None);
        };

        Ok(Some(self.resolve_relations(offer, relations).await?))
    }

    async fn get_credential_offer_by_access_token(
        &self,
        access_token: &Uuid,
        relations: &CredentialOfferRelations,
    ) -> Result<Option<CredentialOffer>, DataLayerError> {
        let offer = credential_offer::Entity::find()
            .filter(credential_offer::Column::AccessToken.eq(access_token.to_string()))
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        let Some(offer) = offer else {
            return Ok(None);
        };

        Ok(Some(self.resolve_relations(offer, relations).await?))
    }

    async fn compare_and_transition(
        &self,
        id: &CredentialOfferId,
        expected_state: CredentialOfferStateEnum,
        request: UpdateCredentialOfferRequest,
    ) -> Result<(), DataLayerError> {
        let expected_state = credential_offer::CredentialOfferState::from(expected_state);
        let next_state = request.state;

        let result = credential_offer::Entity::update_many()
            .set(transition_active_model(request, OffsetDateTime::now_utc()))
            .filter(credential_offer::Column::Id.eq(id))
            .filter(credential_offer::Column::State.eq(expected_state))
            .exec(&self.db)
            .await
            .map_err(to_update_data_layer_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(
                "Credential offer {id} not moved to {next_state}, state is no longer {expected_state:?}"
            );
            return Err(DataLayerError::RecordNotUpdated);
        }

        Ok(())
    }
}
