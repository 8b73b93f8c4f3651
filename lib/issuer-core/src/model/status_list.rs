use serde_json::Value;
use shared_types::{CredentialOfferId, StatusListId};
use strum::{Display, EnumString};
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusList {
    pub id: StatusListId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub r#type: StatusListType,
    /// Type specific configuration, e.g. `{"bits": 2}` for token status lists
    pub config: Value,
    pub uri: String,
    pub status_zipped: String,
    pub next_free_index: u32,
    pub max_length: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct StatusListRelations {}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString)]
pub enum StatusListType {
    #[strum(serialize = "TOKEN_STATUS_LIST")]
    TokenStatusList,
}

impl StatusListType {
    /// Value of the `type` member in the credential `status` claim
    pub fn credential_status_type(&self) -> &'static str {
        match self {
            Self::TokenStatusList => "SwissTokenStatusList-1.0",
        }
    }
}

impl StatusList {
    pub fn has_free_index(&self) -> bool {
        self.next_free_index < self.max_length
    }
}

/// Index reserved for a credential offer within a status list
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusListSlot {
    pub credential_offer_id: CredentialOfferId,
    pub status_list_id: StatusListId,
    pub index: u32,

    // Relations:
    pub status_list: Option<StatusList>,
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct StatusListSlotRelations {
    pub status_list: Option<StatusListRelations>,
}
