#![allow(clippy::unwrap_used)]

use issuer_core::model::credential_offer::CredentialOfferStateEnum;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use serde_json::json;
use shared_types::{CredentialOfferId, StatusListId};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::entity::status_list::StatusListType;
use crate::entity::{credential_offer, status_list};
use crate::{DataLayer, db_conn};

pub fn get_dummy_date() -> OffsetDateTime {
    datetime!(2005-04-02 21:37 +1)
}

pub async fn setup_test_data_layer_and_connection_with_custom_url(database_url: &str) -> DataLayer {
    let db_conn = db_conn(database_url, true).await.unwrap();
    DataLayer::build(db_conn)
}

pub async fn setup_test_data_layer_and_connection() -> DataLayer {
    setup_test_data_layer_and_connection_with_custom_url("sqlite::memory:").await
}

pub async fn insert_credential_offer(
    database: &DatabaseConnection,
    state: CredentialOfferStateEnum,
    offer_expiration_timestamp: OffsetDateTime,
) -> Result<CredentialOfferId, DbErr> {
    let now = OffsetDateTime::now_utc();
    let in_progress = state == CredentialOfferStateEnum::InProgress;

    let offer = credential_offer::ActiveModel {
        id: Set(CredentialOfferId::new_v4()),
        created_date: Set(now),
        last_modified: Set(now),
        state: Set(state.into()),
        credential_configuration_ids: Set(json!(["university_example_sd_jwt"])),
        offer_data: Set(Some(json!({ "data": { "name": "Data Science" } }))),
        credential_metadata: Set(None),
        access_token: Set(in_progress.then(|| Uuid::new_v4().to_string())),
        token_expiration_timestamp: Set(in_progress.then(|| now + Duration::minutes(10))),
        nonce: Set(Uuid::new_v4().to_string()),
        offer_expiration_timestamp: Set(offer_expiration_timestamp),
        credential_valid_from: Set(None),
        credential_valid_until: Set(None),
    }
    .insert(database)
    .await?;

    Ok(offer.id)
}

pub async fn insert_status_list(
    database: &DatabaseConnection,
    max_length: u32,
) -> Result<StatusListId, DbErr> {
    let now = OffsetDateTime::now_utc();
    let id = StatusListId::new_v4();

    let status_list = status_list::ActiveModel {
        id: Set(id),
        created_date: Set(now),
        last_modified: Set(now),
        r#type: Set(StatusListType::TokenStatusList),
        config: Set(json!({ "bits": 2 })),
        uri: Set(format!("https://status.example.com/lists/{id}")),
        status_zipped: Set("eNrbuRgAAhcBXQ".to_string()),
        next_free_index: Set(0),
        max_length: Set(max_length),
    }
    .insert(database)
    .await?;

    Ok(status_list.id)
}

pub(crate) async fn get_credential_offer(
    database: &DatabaseConnection,
    id: &CredentialOfferId,
) -> Result<credential_offer::Model, DbErr> {
    credential_offer::Entity::find_by_id(id)
        .one(database)
        .await?
        .ok_or(DbErr::RecordNotFound(String::default()))
}

pub(crate) async fn get_status_list(
    database: &DatabaseConnection,
    id: &StatusListId,
) -> Result<status_list::Model, DbErr> {
    status_list::Entity::find_by_id(id)
        .one(database)
        .await?
        .ok_or(DbErr::RecordNotFound(String::default()))
}
