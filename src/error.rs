use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChanPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid JSON syntax: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid channel data: {0}")]
    InvalidChannelData(String),
    #[error("Resolution mismatch: {0}")]
    ResolutionMismatch(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid template: {0}")]
    TemplateValidation(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, ChanPackError>;
