use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::macros::{impls_for_seaorm_newtype, impls_for_uuid_newtype};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(transparent)]
#[repr(transparent)]
pub struct StatusListId(Uuid);

impls_for_uuid_newtype!(StatusListId);

#[cfg(feature = "sea-orm")]
impls_for_seaorm_newtype!(StatusListId);

impl StatusListId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}
