//! SD-JWT VC issuance.
//
// https://www.ietf.org/archive/id/draft-ietf-oauth-sd-jwt-vc-08.html

pub(crate) mod disclosures;
pub(crate) mod model;


use std::sync::Arc;

use issuer_crypto::CryptoProvider;
use secrecy::SecretSlice;
use serde_json::{Map, Value};
use time::OffsetDateTime;

use self::disclosures::compute_object_disclosures;
use self::model::{SdJwtVc, SdJwtVcStatus, SdJwtVcStatusList};
use super::CredentialFormatBuilder;
use super::envelope::wrap_credential;
use super::error::FormatterError;
use super::model::{CredentialBuildRequest, CredentialEnvelope};
use crate::model::status_list::StatusListSlot;
use crate::proto::jwt::Jwt;
use crate::proto::jwt::model::JWTPayload;

pub const FORMAT: &str = "vc+sd-jwt";
const TOKEN_TYPE: &str = "vc+sd-jwt";
const HASH_ALGORITHM: &str = "sha-256";
const VCT_INTEGRITY: &str = "vct#integrity";

/// Claims set by the issuer, never taken from offer data
const RESERVED_CLAIMS: [&str; 10] = [
    "iss",
    "iat",
    "nbf",
    "exp",
    "vct",
    VCT_INTEGRITY,
    "cnf",
    "status",
    "_sd",
    "_sd_alg",
];

pub struct Params {
    /// Credential issuer identifier, used as `iss`
    pub issuer_id: String,
    /// `kid` header of issued credentials
    pub key_id: String,
    pub algorithm: String,
}

pub struct SDJWTVCFormatter {
    crypto: Arc<dyn CryptoProvider>,
    params: Params,
    private_key: SecretSlice<u8>,
}

impl SDJWTVCFormatter {
    pub fn new(crypto: Arc<dyn CryptoProvider>, params: Params, private_key: SecretSlice<u8>) -> Self {
        Self {
            crypto,
            params,
            private_key,
        }
    }
}

#[async_trait::async_trait]
impl CredentialFormatBuilder for SDJWTVCFormatter {
    async fn build(
        &self,
        request: CredentialBuildRequest,
    ) -> Result<CredentialEnvelope, FormatterError> {
        let offer_data = request
            .offer
            .offer_data
            .as_ref()
            .ok_or(FormatterError::MissingOfferData)?;
        let claims = extract_claims(offer_data)?;

        let hasher = self.crypto.get_hasher(HASH_ALGORITHM)?;
        let (disclosures, digests) = compute_object_disclosures(&claims, &*hasher)?;

        let vc_type_integrity = request
            .offer
            .credential_metadata
            .as_ref()
            .and_then(|metadata| metadata.get(VCT_INTEGRITY))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        let payload = JWTPayload {
            issued_at: Some(OffsetDateTime::now_utc()),
            expires_at: request.offer.credential_valid_until,
            invalid_before: request.offer.credential_valid_from,
            issuer: Some(self.params.issuer_id.to_owned()),
            custom: SdJwtVc {
                digests,
                hash_alg: Some(HASH_ALGORITHM.to_string()),
                vc_type: request.configuration.vct.to_owned(),
                vc_type_integrity,
                cnf: request.holder_binding,
                status: status_claim(&request.status_list_slots)?,
            },
            ..Default::default()
        };

        let signer = self.crypto.get_signer(&self.params.algorithm)?;
        let jwt = Jwt::new(
            TOKEN_TYPE.to_string(),
            self.params.algorithm.to_owned(),
            Some(self.params.key_id.to_owned()),
            payload,
        )
        .tokenize(Box::new(|input| {
            signer
                .sign(input, &self.private_key)
                .map_err(|e| e.to_string())
        }))?;

        let mut credential = jwt;
        for disclosure in disclosures {
            credential.push('~');
            credential.push_str(&disclosure);
        }
        credential.push('~');

        tracing::debug!(
            "Built {FORMAT} credential for offer {}",
            request.offer.id
        );

        wrap_credential(
            &request.configuration.format,
            credential,
            request.response_encryption.as_ref(),
        )
    }
}

/// Reads the subject claims from `{"data": ..., "data_integrity": ...}`
fn extract_claims(offer_data: &Value) -> Result<Map<String, Value>, FormatterError> {
    let data = offer_data
        .get("data")
        .ok_or(FormatterError::MissingOfferData)?;
    let data_integrity = offer_data.get("data_integrity").and_then(Value::as_str);

    let mut claims = match (data_integrity, data) {
        // signed by the business issuer, the payload claims are used as they are
        (Some("jwt"), Value::String(jwt)) => {
            Jwt::<Map<String, Value>>::decompose_token(jwt)?
                .payload
                .custom
        }
        (Some(other), _) => {
            return Err(FormatterError::InvalidOfferData(format!(
                "unsupported data integrity `{other}`"
            )));
        }
        (None, Value::String(json)) => serde_json::from_str(json)
            .map_err(|e| FormatterError::InvalidOfferData(e.to_string()))?,
        (None, Value::Object(object)) => object.to_owned(),
        (None, _) => {
            return Err(FormatterError::InvalidOfferData(
                "data must be a JSON object".to_string(),
            ));
        }
    };

    for reserved in RESERVED_CLAIMS {
        if claims.remove(reserved).is_some() {
            tracing::warn!("Ignoring reserved claim `{reserved}` from offer data");
        }
    }

    Ok(claims)
}

fn status_claim(slots: &[StatusListSlot]) -> Result<Option<SdJwtVcStatus>, FormatterError> {
    let Some(slot) = slots.first() else {
        return Ok(None);
    };

    let status_list = slot.status_list.as_ref().ok_or_else(|| {
        FormatterError::CouldNotFormat(format!(
            "status list {} not loaded",
            slot.status_list_id
        ))
    })?;

    Ok(Some(SdJwtVcStatus {
        status_list: SdJwtVcStatusList {
            idx: slot.index,
            uri: status_list.uri.to_owned(),
            r#type: status_list.r#type.credential_status_type().to_string(),
        },
    }))
}
