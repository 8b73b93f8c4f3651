use crate::proto::proof_validator::model::CredentialRequestProof;
use crate::provider::credential_formatter::model::CredentialResponseEncryption;

pub const PRE_AUTHORIZED_CODE_GRANT_TYPE: &str =
    "urn:ietf:params:oauth:grant-type:pre-authorized_code";
pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Clone, Debug)]
pub struct OpenID4VCITokenRequestDTO {
    pub grant_type: String,
    pub pre_authorized_code: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenID4VCITokenResponseDTO {
    pub access_token: String,
    pub token_type: String,
    /// Seconds
    pub expires_in: i64,
    pub c_nonce: String,
}

#[derive(Clone, Debug)]
pub struct OpenID4VCICredentialRequestDTO {
    pub format: String,
    pub proof: Option<CredentialRequestProof>,
    pub credential_response_encryption: Option<CredentialResponseEncryption>,
}
