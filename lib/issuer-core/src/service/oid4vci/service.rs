use serde_json::Value;
use shared_types::CredentialOfferId;
use time::OffsetDateTime;
use uuid::Uuid;

use super::OID4VCIService;
use super::dto::{
    OpenID4VCICredentialRequestDTO, OpenID4VCITokenRequestDTO, OpenID4VCITokenResponseDTO,
};
use super::mapper::token_response_from_offer;
use super::validator::{
    offer_not_valid_error, parse_uuid, throw_if_access_token_expired, throw_if_format_mismatch,
    throw_if_offer_not_in_progress, throw_if_response_encryption_invalid,
    throw_if_token_request_invalid,
};
use crate::model::credential_offer::{
    CredentialOffer, CredentialOfferRelations, CredentialOfferStateEnum,
};
use crate::model::status_list::{StatusListRelations, StatusListSlotRelations};
use crate::proto::proof_validator::model::{HolderBindingKey, ProofValidationContext};
use crate::provider::credential_formatter::error::FormatterError;
use crate::provider::credential_formatter::model::{CredentialBuildRequest, CredentialEnvelope};
use crate::provider::issuer_metadata::IssuerMetadataError;
use crate::provider::issuer_metadata::model::CredentialConfiguration;
use crate::repository::error::DataLayerError;
use crate::service::error::{
    CredentialRequestError, CredentialRequestErrorCode, OAuthError, ServiceError,
};

impl OID4VCIService {
    pub fn get_issuer_metadata(&self) -> Value {
        self.metadata_provider.issuer_metadata()
    }

    pub fn get_openid_configuration(&self) -> Value {
        self.metadata_provider.openid_configuration()
    }

    /// Redeems a pre-authorized code for an access token.
    ///
    /// Each code can be redeemed exactly once, concurrent redemptions of the
    /// same code are decided by the storage layer.
    pub async fn create_token(
        &self,
        request: OpenID4VCITokenRequestDTO,
    ) -> Result<OpenID4VCITokenResponseDTO, ServiceError> {
        throw_if_token_request_invalid(&request)?;
        let offer_id: CredentialOfferId = parse_uuid(&request.pre_authorized_code)?.into();

        let now = OffsetDateTime::now_utc();
        let offer = self
            .credential_offer_repository
            .get_credential_offer(&offer_id, &CredentialOfferRelations::default())
            .await?;
        let Some(mut offer) = self.expire_if_needed(offer, now).await? else {
            return Err(OAuthError::invalid_grant("Invalid preAuthCode").into());
        };

        if offer.state != CredentialOfferStateEnum::Offered {
            return Err(OAuthError::invalid_grant("Credential has already been used").into());
        }

        let update = offer
            .mark_as_in_progress(now, self.context.token_ttl)
            .map_err(|_| OAuthError::invalid_grant("Credential has already been used"))?;

        match self
            .credential_offer_repository
            .compare_and_transition(&offer.id, CredentialOfferStateEnum::Offered, update)
            .await
        {
            Ok(()) => {}
            Err(DataLayerError::RecordNotUpdated) => {
                return Err(OAuthError::invalid_grant("Credential has already been used").into());
            }
            Err(error) => return Err(error.into()),
        }

        tracing::info!("Pre-authorized code redeemed for credential offer {}", offer.id);

        token_response_from_offer(&offer, now)
    }

    /// Issues the credential for an access token obtained from [`Self::create_token`].
    pub async fn create_credential(
        &self,
        access_token: &str,
        request: OpenID4VCICredentialRequestDTO,
    ) -> Result<CredentialEnvelope, ServiceError> {
        let access_token = parse_uuid(access_token)?;

        let now = OffsetDateTime::now_utc();
        let offer = self.get_offer_by_access_token(&access_token, now).await?;

        throw_if_offer_not_in_progress(&offer)?;
        throw_if_access_token_expired(&offer, now)?;

        let credential_configuration_id = offer
            .credential_configuration_ids
            .first()
            .ok_or_else(credential_not_offered)?
            .to_owned();
        let configuration = self
            .metadata_provider
            .get_credential_configuration(&credential_configuration_id)
            .map_err(|error| match error {
                IssuerMetadataError::UnknownCredentialConfiguration(_) => {
                    ServiceError::from(credential_not_offered())
                }
                other => other.into(),
            })?;

        throw_if_format_mismatch(&configuration, &request.format)?;

        let holder_binding = self.holder_binding(&offer, &configuration, &request, now)?;

        let response_encryption = self.metadata_provider.response_encryption();
        throw_if_response_encryption_invalid(
            response_encryption.as_ref(),
            request.credential_response_encryption.as_ref(),
        )?;

        let status_list_slots = self
            .status_list_repository
            .get_status_list_slots(
                &offer.id,
                &StatusListSlotRelations {
                    status_list: Some(StatusListRelations::default()),
                },
            )
            .await?;

        let format_builder = self
            .format_builder_provider
            .get_format_builder(&configuration.format)
            .ok_or_else(|| FormatterError::MissingFormatBuilder(configuration.format.to_owned()))?;

        let envelope = format_builder
            .build(CredentialBuildRequest {
                offer: offer.clone(),
                configuration,
                holder_binding,
                response_encryption: request.credential_response_encryption,
                credential_types: vec![credential_configuration_id],
                status_list_slots,
            })
            .await?;

        let mut offer = offer;
        let update = offer
            .mark_as_issued(now)
            .map_err(|error| offer_not_valid_error(error.from))?;

        match self
            .credential_offer_repository
            .compare_and_transition(&offer.id, CredentialOfferStateEnum::InProgress, update)
            .await
        {
            Ok(()) => {}
            Err(DataLayerError::RecordNotUpdated) => {
                return Err(self.lost_issuance_race(&offer.id).await);
            }
            Err(error) => return Err(error.into()),
        }

        tracing::info!("Credential issued for credential offer {}", offer.id);

        Ok(envelope)
    }

    async fn get_offer_by_access_token(
        &self,
        access_token: &Uuid,
        now: OffsetDateTime,
    ) -> Result<CredentialOffer, ServiceError> {
        let offer = self
            .credential_offer_repository
            .get_credential_offer_by_access_token(
                access_token,
                &CredentialOfferRelations::default(),
            )
            .await?;

        self.expire_if_needed(offer, now)
            .await?
            .ok_or_else(|| OAuthError::invalid_request("Invalid accessToken").into())
    }

    /// Expires the offer on read once its deadline has passed.
    ///
    /// Returns the normalized record, the caller reports its state.
    async fn expire_if_needed(
        &self,
        offer: Option<CredentialOffer>,
        now: OffsetDateTime,
    ) -> Result<Option<CredentialOffer>, ServiceError> {
        let mut offer = offer;

        loop {
            let Some(current) = offer.as_mut() else {
                return Ok(None);
            };

            if !current.has_offer_expired(now) {
                return Ok(offer);
            }

            let expected_state = current.state;
            let Some(update) = current.mark_as_expired(now) else {
                // already expired or issued
                return Ok(offer);
            };
            let id = current.id;

            match self
                .credential_offer_repository
                .compare_and_transition(&id, expected_state, update)
                .await
            {
                Ok(()) => {
                    tracing::info!("Credential offer {id} expired");
                    return Ok(offer);
                }
                // another writer moved the offer, expire the fresh record
                Err(DataLayerError::RecordNotUpdated) => {
                    offer = self
                        .credential_offer_repository
                        .get_credential_offer(&id, &CredentialOfferRelations::default())
                        .await?;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    fn holder_binding(
        &self,
        offer: &CredentialOffer,
        configuration: &CredentialConfiguration,
        request: &OpenID4VCICredentialRequestDTO,
        now: OffsetDateTime,
    ) -> Result<Option<HolderBindingKey>, ServiceError> {
        let Some(proof_types) = configuration
            .proof_types_supported
            .as_ref()
            .filter(|_| configuration.requires_proof())
        else {
            return Ok(None);
        };

        let proof = request.proof.as_ref().ok_or_else(|| {
            CredentialRequestError::invalid_proof(
                "Proof must be provided for the requested credential",
            )
        })?;

        let supported = proof_types
            .get(&proof.proof_type().to_string())
            .ok_or_else(|| {
                CredentialRequestError::invalid_proof(
                    "Provided proof is not supported for the credential requested.",
                )
            })?;

        let issuer_id = self.metadata_provider.credential_issuer();
        let key = proof
            .validate(
                offer,
                &ProofValidationContext {
                    issuer_id: &issuer_id,
                    supported_signing_algorithms: &supported.proof_signing_alg_values_supported,
                    now,
                    crypto: &*self.crypto,
                },
            )
            .map_err(|error| {
                tracing::warn!("Invalid proof for credential offer {}: {error}", offer.id);
                CredentialRequestError::invalid_proof(error.to_string())
            })?;

        Ok(Some(key))
    }

    /// Reports the state another writer moved the offer to
    async fn lost_issuance_race(&self, id: &CredentialOfferId) -> ServiceError {
        let current = self
            .credential_offer_repository
            .get_credential_offer(id, &CredentialOfferRelations::default())
            .await;

        match current {
            Ok(Some(offer)) => offer_not_valid_error(offer.state),
            Ok(None) => OAuthError::invalid_request("Invalid accessToken").into(),
            Err(error) => error.into(),
        }
    }
}

fn credential_not_offered() -> CredentialRequestError {
    CredentialRequestError::new(
        CredentialRequestErrorCode::InvalidCredentialRequest,
        "Requested Credential is not offered (anymore).",
    )
}
