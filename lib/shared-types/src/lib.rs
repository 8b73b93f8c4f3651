//! Identifier newtypes shared between the issuance core, the data layer and the server.

mod credential_offer_id;
mod macros;
mod status_list_id;

pub use credential_offer_id::CredentialOfferId;
pub use status_list_id::StatusListId;
