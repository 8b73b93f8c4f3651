use issuer_core::model::status_list;
use one_dto_mapper::{From, Into};
use sea_orm::entity::prelude::*;
use shared_types::StatusListId;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "status_list")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: StatusListId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub r#type: StatusListType,
    pub config: Json,
    pub uri: String,
    #[sea_orm(column_type = "Text")]
    pub status_zipped: String,
    pub next_free_index: u32,
    pub max_length: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credential_offer_status::Entity")]
    CredentialOfferStatus,
}

impl Related<super::credential_offer_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CredentialOfferStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, DeriveActiveEnum, From, Into)]
#[from(status_list::StatusListType)]
#[into(status_list::StatusListType)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum StatusListType {
    #[sea_orm(string_value = "TOKEN_STATUS_LIST")]
    TokenStatusList,
}
