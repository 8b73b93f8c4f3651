pub mod credential_offer;
pub mod credential_offer_status;
pub mod status_list;
