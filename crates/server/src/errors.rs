use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("startup task failed: {0}")]
    Task(#[from] service::errors::ServiceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
