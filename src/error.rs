use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid identifier: {0:?} is not an integer")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
