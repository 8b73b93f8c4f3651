use issuer_core::model::status_list::{StatusList, StatusListSlot};
use sea_orm::Set;

use crate::entity::{credential_offer_status, status_list};

impl From<StatusList> for status_list::ActiveModel {
    fn from(value: StatusList) -> Self {
        Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            last_modified: Set(value.last_modified),
            r#type: Set(value.r#type.into()),
            config: Set(value.config),
            uri: Set(value.uri),
            status_zipped: Set(value.status_zipped),
            next_free_index: Set(value.next_free_index),
            max_length: Set(value.max_length),
        }
    }
}

impl From<status_list::Model> for StatusList {
    fn from(value: status_list::Model) -> Self {
        Self {
            id: value.id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            r#type: value.r#type.into(),
            config: value.config,
            uri: value.uri,
            status_zipped: value.status_zipped,
            next_free_index: value.next_free_index,
            max_length: value.max_length,
        }
    }
}

impl From<StatusListSlot> for credential_offer_status::ActiveModel {
    fn from(value: StatusListSlot) -> Self {
        Self {
            credential_offer_id: Set(value.credential_offer_id),
            status_list_id: Set(value.status_list_id),
            index: Set(value.index),
        }
    }
}

pub(super) fn slot_from_models(
    slot: credential_offer_status::Model,
    status_list: Option<status_list::Model>,
) -> StatusListSlot {
    StatusListSlot {
        credential_offer_id: slot.credential_offer_id,
        status_list_id: slot.status_list_id,
        index: slot.index,
        status_list: status_list.map(Into::into),
    }
}
