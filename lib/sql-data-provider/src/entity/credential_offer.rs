use issuer_core::model::credential_offer::CredentialOfferStateEnum as ModelCredentialOfferState;
use one_dto_mapper::{From, Into};
use sea_orm::entity::prelude::*;
use shared_types::CredentialOfferId;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credential_offer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: CredentialOfferId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub state: CredentialOfferState,
    pub credential_configuration_ids: Json,
    pub offer_data: Option<Json>,
    pub credential_metadata: Option<Json>,
    pub access_token: Option<String>,
    pub token_expiration_timestamp: Option<OffsetDateTime>,
    pub nonce: String,
    pub offer_expiration_timestamp: OffsetDateTime,
    pub credential_valid_from: Option<OffsetDateTime>,
    pub credential_valid_until: Option<OffsetDateTime>,
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
#[from(ModelCredentialOfferState)]
#[into(ModelCredentialOfferState)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CredentialOfferState {
    #[sea_orm(string_value = "OFFERED")]
    Offered,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "ISSUED")]
    Issued,
    #[sea_orm(string_value = "EXPIRED")]
    Expired,
}
