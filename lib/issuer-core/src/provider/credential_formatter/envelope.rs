use issuer_crypto::jwe::{Header, JWE_ALGORITHM, JWE_ENCRYPTION, build_jwe};

use super::error::FormatterError;
use super::model::{
    CONTENT_TYPE_JSON, CONTENT_TYPE_JWT, CredentialEnvelope, CredentialResponse,
    CredentialResponseEncryption,
};

/// Wraps an issued credential into the credential endpoint response,
/// encrypted for the holder when requested.
pub(crate) fn wrap_credential(
    format: &str,
    credential: String,
    encryption: Option<&CredentialResponseEncryption>,
) -> Result<CredentialEnvelope, FormatterError> {
    let response = serde_json::to_string(&CredentialResponse {
        format: format.to_owned(),
        credential,
    })
    .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))?;

    let Some(encryption) = encryption else {
        return Ok(CredentialEnvelope {
            content_type: CONTENT_TYPE_JSON.to_string(),
            body: response,
        });
    };

    if encryption.alg != JWE_ALGORITHM || encryption.enc != JWE_ENCRYPTION {
        return Err(FormatterError::CouldNotEncrypt(format!(
            "unsupported alg `{}` / enc `{}`",
            encryption.alg, encryption.enc
        )));
    }

    let jwe = build_jwe(response.as_bytes(), Header::default(), &encryption.jwk)
        .map_err(|e| FormatterError::CouldNotEncrypt(e.to_string()))?;

    Ok(CredentialEnvelope {
        content_type: CONTENT_TYPE_JWT.to_string(),
        body: jwe,
    })
}
