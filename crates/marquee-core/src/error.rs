use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid speed: {0} (must be a finite number of pixels per second above zero)")]
    InvalidSpeed(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
