use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoreError {
    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error("Concert not found: {0}")]
    ConcertNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, EncoreError>;
