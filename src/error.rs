// Dayreel Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DayreelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("FFmpeg error: {0}")]
    FFmpeg(String),

    #[error("FFprobe error: {0}")]
    FFprobe(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Unexpected server response: {0}")]
    UnexpectedResponse(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DayreelError {
    fn from(err: anyhow::Error) -> Self {
        DayreelError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DayreelError>;
