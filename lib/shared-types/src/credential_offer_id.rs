use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::macros::{impls_for_seaorm_newtype, impls_for_uuid_newtype};

/// Identifies a credential offer. The same value is handed to the wallet as
/// the pre-authorized code.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(transparent)]
#[repr(transparent)]
pub struct CredentialOfferId(Uuid);

impls_for_uuid_newtype!(CredentialOfferId);

#[cfg(feature = "sea-orm")]
impls_for_seaorm_newtype!(CredentialOfferId);

impl CredentialOfferId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}
