use autometrics::autometrics;
use issuer_core::model::status_list::{
    StatusList, StatusListRelations, StatusListSlot, StatusListSlotRelations,
};
use issuer_core::repository::error::DataLayerError;
use issuer_core::repository::status_list_repository::StatusListRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use shared_types::{CredentialOfferId, StatusListId};
use time::OffsetDateTime;

use super::StatusListProvider;
use super::mapper::slot_from_models;
use crate::entity::{credential_offer_status, status_list};
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

#[autometrics]
#[async_trait::async_trait]
impl StatusListRepository for StatusListProvider {
    async fn create_status_list(
        &self,
        request: StatusList,
    ) -> Result<StatusListId, DataLayerError> {
        let status_list = status_list::ActiveModel::from(request)
            .insert(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(status_list.id)
    }

    async fn get_status_list(
        &self,
        id: &StatusListId,
        _relations: &StatusListRelations,
    ) -> Result<Option<StatusList>, DataLayerError> {
        let status_list = status_list::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(status_list.map(Into::into))
    }

    async fn allocate_index(&self, id: &StatusListId) -> Result<u32, DataLayerError> {
        let txn = self.db.begin().await.map_err(to_data_layer_error)?;

        let result = status_list::Entity::update_many()
            .col_expr(
                status_list::Column::NextFreeIndex,
                Expr::col(status_list::Column::NextFreeIndex).add(1),
            )
            .col_expr(
                status_list::Column::LastModified,
                Expr::value(OffsetDateTime::now_utc()),
            )
            .filter(status_list::Column::Id.eq(id))
            .filter(
                Expr::col(status_list::Column::NextFreeIndex)
                    .lt(Expr::col(status_list::Column::MaxLength)),
            )
            .exec(&txn)
            .await
            .map_err(to_update_data_layer_error)?;

        let status_list = status_list::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(to_data_layer_error)?
            .ok_or(DataLayerError::RecordNotUpdated)?;

        if result.rows_affected == 0 {
            return Err(DataLayerError::CapacityExceeded(*id));
        }

        txn.commit().await.map_err(to_data_layer_error)?;

        Ok(status_list.next_free_index - 1)
    }

    async fn create_status_list_slot(
        &self,
        request: StatusListSlot,
    ) -> Result<(), DataLayerError> {
        credential_offer_status::Entity::insert(credential_offer_status::ActiveModel::from(
            request,
        ))
        .exec_without_returning(&self.db)
        .await
        .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn get_status_list_slots(
        &self,
        credential_offer_id: &CredentialOfferId,
        relations: &StatusListSlotRelations,
    ) -> Result<Vec<StatusListSlot>, DataLayerError> {
        let query = credential_offer_status::Entity::find()
            .filter(credential_offer_status::Column::CredentialOfferId.eq(credential_offer_id))
            .order_by_asc(credential_offer_status::Column::StatusListId);

        if relations.status_list.is_none() {
            let slots = query.all(&self.db).await.map_err(to_data_layer_error)?;

            return Ok(slots
                .into_iter()
                .map(|slot| slot_from_models(slot, None))
                .collect());
        }

        let slots = query
            .find_also_related(status_list::Entity)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        slots
            .into_iter()
            .map(|(slot, status_list)| {
                let status_list =
                    status_list.ok_or_else(|| DataLayerError::MissingRequiredRelation {
                        relation: "status_list",
                        id: slot.status_list_id.to_string(),
                    })?;

                Ok(slot_from_models(slot, Some(status_list)))
            })
            .collect()
    }
}
