pub mod credential_formatter;
pub mod issuer_metadata;
