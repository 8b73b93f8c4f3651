use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::proto::proof_validator::model::HolderBindingKey;

#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SdJwtVc {
    #[serde(rename = "_sd", default)]
    pub digests: Vec<String>,

    /// Hash algorithm
    /// https://www.iana.org/assignments/named-information/named-information.xhtml
    #[serde(rename = "_sd_alg", default)]
    pub hash_alg: Option<String>,

    #[serde(rename = "vct", default)]
    pub vc_type: Option<String>,

    #[serde(rename = "vct#integrity", default)]
    pub vc_type_integrity: Option<String>,

    /// Holder key, embedded directly without a `jwk` member
    #[serde(default)]
    pub cnf: Option<HolderBindingKey>,

    #[serde(default)]
    pub status: Option<SdJwtVcStatus>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdJwtVcStatus {
    pub status_list: SdJwtVcStatusList,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdJwtVcStatusList {
    pub idx: u32,
    pub uri: String,
    pub r#type: String,
}
