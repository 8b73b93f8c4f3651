use thiserror::Error;

pub mod core_config;


#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Config parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Invalid value of `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("Missing template replacement `{0}`")]
    MissingTemplateReplacement(String),
}
