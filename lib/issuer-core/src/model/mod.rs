pub mod credential_offer;
pub mod status_list;
