pub mod jwt;
pub mod proof_validator;
