use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpacewalkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API error: {0}")]
    Api(String),

    #[error("Document decode error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SpacewalkError>;
