use sea_orm_migration::prelude::*;

use crate::datatype::{timestamp, timestamp_null, uuid_char, uuid_char_null};

#[derive(DeriveMigrationName)]
pub struct Migration;

const UNIQUE_ACCESS_TOKEN_INDEX: &str = "index-CredentialOffer-AccessToken-Unique";
const UNIQUE_STATUS_LIST_URI_INDEX: &str = "index-StatusList-Uri-Unique";
const UNIQUE_STATUS_LIST_INDEX_INDEX: &str = "index-CredentialOfferStatus-StatusListId-Index-Unique";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CredentialOffer::Table)
                    .if_not_exists()
                    .col(uuid_char(CredentialOffer::Id).primary_key())
                    .col(timestamp(CredentialOffer::CreatedDate, manager))
                    .col(timestamp(CredentialOffer::LastModified, manager))
                    .col(ColumnDef::new(CredentialOffer::State).string().not_null())
                    .col(
                        ColumnDef::new(CredentialOffer::CredentialConfigurationIds)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CredentialOffer::OfferData).json().null())
                    .col(
                        ColumnDef::new(CredentialOffer::CredentialMetadata)
                            .json()
                            .null(),
                    )
                    .col(uuid_char_null(CredentialOffer::AccessToken))
                    .col(timestamp_null(
                        CredentialOffer::TokenExpirationTimestamp,
                        manager,
                    ))
                    .col(uuid_char(CredentialOffer::Nonce))
                    .col(timestamp(CredentialOffer::OfferExpirationTimestamp, manager))
                    .col(timestamp_null(CredentialOffer::CredentialValidFrom, manager))
                    .col(timestamp_null(CredentialOffer::CredentialValidUntil, manager))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_ACCESS_TOKEN_INDEX)
                    .table(CredentialOffer::Table)
                    .col(CredentialOffer::AccessToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StatusList::Table)
                    .if_not_exists()
                    .col(uuid_char(StatusList::Id).primary_key())
                    .col(timestamp(StatusList::CreatedDate, manager))
                    .col(timestamp(StatusList::LastModified, manager))
                    .col(ColumnDef::new(StatusList::Type).string().not_null())
                    .col(ColumnDef::new(StatusList::Config).json().not_null())
                    .col(ColumnDef::new(StatusList::Uri).string().not_null())
                    .col(ColumnDef::new(StatusList::StatusZipped).text().not_null())
                    .col(
                        ColumnDef::new(StatusList::NextFreeIndex)
                            .unsigned()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(StatusList::MaxLength).unsigned().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_STATUS_LIST_URI_INDEX)
                    .table(StatusList::Table)
                    .col(StatusList::Uri)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CredentialOfferStatus::Table)
                    .if_not_exists()
                    .col(uuid_char(CredentialOfferStatus::CredentialOfferId))
                    .col(uuid_char(CredentialOfferStatus::StatusListId))
                    .col(
                        ColumnDef::new(CredentialOfferStatus::Index)
                            .unsigned()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk-CredentialOfferStatus")
                            .col(CredentialOfferStatus::CredentialOfferId)
                            .col(CredentialOfferStatus::StatusListId)
                            .primary(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-CredentialOfferStatus-CredentialOfferId")
                            .from_tbl(CredentialOfferStatus::Table)
                            .from_col(CredentialOfferStatus::CredentialOfferId)
                            .to_tbl(CredentialOffer::Table)
                            .to_col(CredentialOffer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-CredentialOfferStatus-StatusListId")
                            .from_tbl(CredentialOfferStatus::Table)
                            .from_col(CredentialOfferStatus::StatusListId)
                            .to_tbl(StatusList::Table)
                            .to_col(StatusList::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // one credential per status list entry
        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_STATUS_LIST_INDEX_INDEX)
                    .table(CredentialOfferStatus::Table)
                    .col(CredentialOfferStatus::StatusListId)
                    .col(CredentialOfferStatus::Index)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CredentialOfferStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StatusList::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CredentialOffer::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
#[allow(clippy::enum_variant_names)]
pub enum CredentialOffer {
    Table,
    Id,
    CreatedDate,
    LastModified,
    State,
    CredentialConfigurationIds,
    OfferData,
    CredentialMetadata,
    AccessToken,
    TokenExpirationTimestamp,
    Nonce,
    OfferExpirationTimestamp,
    CredentialValidFrom,
    CredentialValidUntil,
}

#[derive(Iden)]
pub enum StatusList {
    Table,
    Id,
    CreatedDate,
    LastModified,
    Type,
    Config,
    Uri,
    StatusZipped,
    NextFreeIndex,
    MaxLength,
}

#[derive(Iden)]
pub enum CredentialOfferStatus {
    Table,
    CredentialOfferId,
    StatusListId,
    Index,
}
