use serde_json::Value;
use shared_types::CredentialOfferId;
use strum::{Display, EnumString};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::status_list::{StatusListSlot, StatusListSlotRelations};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialOffer {
    pub id: CredentialOfferId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub state: CredentialOfferStateEnum,
    /// Credential configuration ids from the issuer metadata, only the first one is issued
    pub credential_configuration_ids: Vec<String>,
    pub offer_data: Option<Value>,
    pub credential_metadata: Option<Value>,
    pub access_token: Option<Uuid>,
    pub token_expiration_timestamp: Option<OffsetDateTime>,
    pub nonce: Uuid,
    pub offer_expiration_timestamp: OffsetDateTime,
    pub credential_valid_from: Option<OffsetDateTime>,
    pub credential_valid_until: Option<OffsetDateTime>,

    // Relations:
    pub status_list_slots: Option<Vec<StatusListSlot>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct CredentialOfferRelations {
    pub status_list_slots: Option<StatusListSlotRelations>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialOfferStateEnum {
    Offered,
    InProgress,
    Issued,
    Expired,
}

impl CredentialOfferStateEnum {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Issued | Self::Expired)
    }

    /// Legal edges: OFFERED -> IN_PROGRESS -> ISSUED, and any non-terminal state -> EXPIRED
    pub fn can_transition_to(&self, next: CredentialOfferStateEnum) -> bool {
        match (self, next) {
            (Self::Offered, Self::InProgress) | (Self::InProgress, Self::Issued) => true,
            (current, Self::Expired) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// Changes applied together with a state transition
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateCredentialOfferRequest {
    pub state: CredentialOfferStateEnum,
    pub access_token: Option<Uuid>,
    pub token_expiration_timestamp: Option<OffsetDateTime>,
    pub clear_offer_data: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Invalid credential offer transition from {from} to {to}")]
pub struct InvalidTransitionError {
    pub from: CredentialOfferStateEnum,
    pub to: CredentialOfferStateEnum,
}

impl CredentialOffer {
    pub fn has_offer_expired(&self, now: OffsetDateTime) -> bool {
        now > self.offer_expiration_timestamp
    }

    pub fn is_token_expired(&self, now: OffsetDateTime) -> bool {
        self.token_expiration_timestamp
            .is_some_and(|expiration| now > expiration)
    }

    /// Redeems the pre-authorized code. The access token is minted only once.
    pub fn mark_as_in_progress(
        &mut self,
        now: OffsetDateTime,
        token_ttl: Duration,
    ) -> Result<UpdateCredentialOfferRequest, InvalidTransitionError> {
        self.transition_to(CredentialOfferStateEnum::InProgress)?;

        let access_token = *self.access_token.get_or_insert_with(Uuid::new_v4);
        let token_expiration_timestamp = now + token_ttl;
        self.token_expiration_timestamp = Some(token_expiration_timestamp);
        self.last_modified = now;

        Ok(UpdateCredentialOfferRequest {
            state: self.state,
            access_token: Some(access_token),
            token_expiration_timestamp: Some(token_expiration_timestamp),
            clear_offer_data: false,
        })
    }

    pub fn mark_as_issued(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<UpdateCredentialOfferRequest, InvalidTransitionError> {
        self.transition_to(CredentialOfferStateEnum::Issued)?;
        self.offer_data = None;
        self.last_modified = now;

        Ok(UpdateCredentialOfferRequest {
            state: self.state,
            access_token: self.access_token,
            token_expiration_timestamp: self.token_expiration_timestamp,
            clear_offer_data: true,
        })
    }

    /// Returns `None` when the offer is already expired, expiring is idempotent
    pub fn mark_as_expired(&mut self, now: OffsetDateTime) -> Option<UpdateCredentialOfferRequest> {
        if self.state == CredentialOfferStateEnum::Expired {
            return None;
        }

        // issued offers are terminal
        self.transition_to(CredentialOfferStateEnum::Expired).ok()?;
        self.offer_data = None;
        self.access_token = None;
        self.token_expiration_timestamp = None;
        self.last_modified = now;

        Some(UpdateCredentialOfferRequest {
            state: self.state,
            access_token: None,
            token_expiration_timestamp: None,
            clear_offer_data: true,
        })
    }

    fn transition_to(
        &mut self,
        next: CredentialOfferStateEnum,
    ) -> Result<(), InvalidTransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransitionError {
                from: self.state,
                to: next,
            });
        }

        self.state = next;
        Ok(())
    }
}
