use shared_types::{CredentialOfferId, StatusListId};

use super::error::DataLayerError;
use crate::model::status_list::{
    StatusList, StatusListRelations, StatusListSlot, StatusListSlotRelations,
};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait StatusListRepository: Send + Sync {
    async fn create_status_list(&self, request: StatusList)
    -> Result<StatusListId, DataLayerError>;

    async fn get_status_list(
        &self,
        id: &StatusListId,
        relations: &StatusListRelations,
    ) -> Result<Option<StatusList>, DataLayerError>;

    /// Atomically reserves the next free index of the list.
    ///
    /// Concurrent callers never receive the same index. Fails with
    /// [`DataLayerError::CapacityExceeded`] once `max_length` is reached.
    async fn allocate_index(&self, id: &StatusListId) -> Result<u32, DataLayerError>;

    async fn create_status_list_slot(&self, request: StatusListSlot)
    -> Result<(), DataLayerError>;

    async fn get_status_list_slots(
        &self,
        credential_offer_id: &CredentialOfferId,
        relations: &StatusListSlotRelations,
    ) -> Result<Vec<StatusListSlot>, DataLayerError>;
}
