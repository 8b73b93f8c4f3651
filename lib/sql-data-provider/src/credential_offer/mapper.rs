use std::str::FromStr;

use issuer_core::model::credential_offer::{CredentialOffer, UpdateCredentialOfferRequest};
use issuer_core::repository::error::DataLayerError;
use sea_orm::{NotSet, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::credential_offer;

impl TryFrom<CredentialOffer> for credential_offer::ActiveModel {
    type Error = DataLayerError;

    fn try_from(value: CredentialOffer) -> Result<Self, DataLayerError> {
        let credential_configuration_ids = serde_json::to_value(value.credential_configuration_ids)
            .map_err(|_| DataLayerError::MappingError)?;

        Ok(Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            last_modified: Set(value.last_modified),
            state: Set(value.state.into()),
            credential_configuration_ids: Set(credential_configuration_ids),
            offer_data: Set(value.offer_data),
            credential_metadata: Set(value.credential_metadata),
            access_token: Set(value.access_token.map(|token| token.to_string())),
            token_expiration_timestamp: Set(value.token_expiration_timestamp),
            nonce: Set(value.nonce.to_string()),
            offer_expiration_timestamp: Set(value.offer_expiration_timestamp),
            credential_valid_from: Set(value.credential_valid_from),
            credential_valid_until: Set(value.credential_valid_until),
        })
    }
}

impl TryFrom<credential_offer::Model> for CredentialOffer {
    type Error = DataLayerError;

    fn try_from(value: credential_offer::Model) -> Result<Self, DataLayerError> {
        let credential_configuration_ids =
            serde_json::from_value(value.credential_configuration_ids)
                .map_err(|_| DataLayerError::MappingError)?;

        Ok(Self {
            id: value.id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            state: value.state.into(),
            credential_configuration_ids,
            offer_data: value.offer_data,
            credential_metadata: value.credential_metadata,
            access_token: value
                .access_token
                .as_deref()
                .map(Uuid::from_str)
                .transpose()?,
            token_expiration_timestamp: value.token_expiration_timestamp,
            nonce: Uuid::from_str(&value.nonce)?,
            offer_expiration_timestamp: value.offer_expiration_timestamp,
            credential_valid_from: value.credential_valid_from,
            credential_valid_until: value.credential_valid_until,
            status_list_slots: None,
        })
    }
}

pub(super) fn transition_active_model(
    request: UpdateCredentialOfferRequest,
    now: OffsetDateTime,
) -> credential_offer::ActiveModel {
    credential_offer::ActiveModel {
        last_modified: Set(now),
        state: Set(request.state.into()),
        access_token: Set(request.access_token.map(|token| token.to_string())),
        token_expiration_timestamp: Set(request.token_expiration_timestamp),
        offer_data: if request.clear_offer_data {
            Set(None)
        } else {
            NotSet
        },
        ..Default::default()
    }
}
