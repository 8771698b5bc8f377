use thiserror::Error;

use crate::config::ConfigError;
use crate::data::{FormatError, LoadError};
use crate::report::ReportError;
use crate::scoring::ScoreError;
use crate::session::SessionError;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid question file: {0}")]
    Format(#[from] FormatError),

    #[error("Scoring failed: {0}")]
    Score(#[from] ScoreError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Export failed: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No exam in progress: {0}")]
    MissingSession(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
