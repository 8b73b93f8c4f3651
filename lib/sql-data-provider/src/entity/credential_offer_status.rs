use sea_orm::entity::prelude::*;
use shared_types::{CredentialOfferId, StatusListId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credential_offer_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub credential_offer_id: CredentialOfferId,
    #[sea_orm(primary_key, auto_increment = false)]
    pub status_list_id: StatusListId,
    pub index: u32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credential_offer::Entity",
        from = "Column::CredentialOfferId",
        to = "super::credential_offer::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    CredentialOffer,
    #[sea_orm(
        belongs_to = "super::status_list::Entity",
        from = "Column::StatusListId",
        to = "super::status_list::Column::Id",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    StatusList,
}

impl Related<super::credential_offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CredentialOffer.def()
    }
}

impl Related<super::status_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
