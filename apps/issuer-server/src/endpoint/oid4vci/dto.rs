use issuer_core::provider::credential_formatter::model::CredentialResponseEncryption;
use issuer_core::service::oid4vci::dto::{
    OpenID4VCITokenRequestDTO, OpenID4VCITokenResponseDTO, PRE_AUTHORIZED_CODE_GRANT_TYPE,
};
use issuer_crypto::jwe::RemoteJwk;
use one_dto_mapper::{From, Into};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, ToSchema, Into)]
#[into(OpenID4VCITokenRequestDTO)]
pub struct OpenID4VCITokenRequestRestDTO {
    #[serde(default = "default_grant_type")]
    #[schema(example = "urn:ietf:params:oauth:grant-type:pre-authorized_code")]
    pub grant_type: String,
    #[serde(rename = "pre-authorized_code")]
    pub pre_authorized_code: String,
}

fn default_grant_type() -> String {
    PRE_AUTHORIZED_CODE_GRANT_TYPE.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, From)]
#[from(OpenID4VCITokenResponseDTO)]
pub struct OpenID4VCITokenResponseRestDTO {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub c_nonce: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct OpenID4VCICredentialRequestRestDTO {
    #[schema(example = "vc+sd-jwt")]
    pub format: String,
    pub proof: Option<OpenID4VCIProofRequestRestDTO>,
    pub credential_response_encryption: Option<CredentialResponseEncryptionRestDTO>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct OpenID4VCIProofRequestRestDTO {
    #[schema(example = "jwt")]
    pub proof_type: String,
    pub jwt: Option<String>,
}

#[derive(Clone, Debug, Deserialize, ToSchema, Into)]
#[into(CredentialResponseEncryption)]
pub struct CredentialResponseEncryptionRestDTO {
    pub jwk: PublicJwkRestDTO,
    #[schema(example = "ECDH-ES")]
    pub alg: String,
    #[schema(example = "A256GCM")]
    pub enc: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema, Into)]
#[into(RemoteJwk)]
pub struct PublicJwkRestDTO {
    #[schema(example = "EC")]
    pub kty: String,
    #[schema(example = "P-256")]
    pub crv: String,
    pub x: String,
    pub y: Option<String>,
}
