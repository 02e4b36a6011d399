use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CoreError(#[from] calsift_core::error::CoreError),

    #[error(transparent)]
    RfcError(#[from] calsift_rfc::error::RfcError),

    #[error(transparent)]
    EngineError(#[from] calsift_engine::EngineError),

    #[error("Failed to fetch feed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Failed to read feed file: {0}")]
    IoError(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
