use issuer_crypto::Hasher;
use serde_json::{Map, Value, json};

use crate::proto::jwt::mapper::string_to_b64url_string;
use crate::provider::credential_formatter::error::FormatterError;

pub(super) const SELECTIVE_DISCLOSURE_MARKER: &str = "_sd";

// The algorithm follows: https://datatracker.ietf.org/doc/html/draft-ietf-oauth-selective-disclosure-jwt-14#section-4.2.1
/// Returns all disclosures (nested ones included) and the digests of the top level claims.
pub(super) fn compute_object_disclosures(
    object: &Map<String, Value>,
    hasher: &dyn Hasher,
) -> Result<(Vec<String>, Vec<String>), FormatterError> {
    let mut disclosures = vec![];
    let mut digests = vec![];

    for (key, value) in object {
        let disclosure = match value {
            Value::Object(nested) => {
                let (nested_disclosures, nested_digests) =
                    compute_object_disclosures(nested, hasher)?;
                disclosures.extend(nested_disclosures);

                compute_disclosure_for(
                    key,
                    &json!({ SELECTIVE_DISCLOSURE_MARKER: nested_digests }),
                )?
            }
            _ => compute_disclosure_for(key, value)?,
        };

        let digest = hasher
            .hash_base64(disclosure.as_bytes())
            .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))?;

        disclosures.push(disclosure);
        digests.push(digest);
    }

    // claim order must not be derivable from the digests
    digests.sort_unstable();

    Ok((disclosures, digests))
}

fn compute_disclosure_for(key: &str, value: &Value) -> Result<String, FormatterError> {
    let salt = issuer_crypto::utilities::generate_salt_base64_16();

    let array = json!([salt, key, value]).to_string();

    string_to_b64url_string(&array).map_err(FormatterError::from)
}
