//! Error taxonomy for one report invocation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The first argument is not a known report kind.
    #[error("unrecognized report kind {0:?}")]
    InvalidMode(String),

    /// A valid kind was given without any input file.
    #[error("report kind '{0}' needs at least one input file")]
    MissingInput(String),

    /// Missing/unreadable file, malformed CSV, or a required column absent.
    #[error("cannot read {}: {reason}", .path.display())]
    InputRead { path: PathBuf, reason: String },

    /// Charting backend or viewer failure.
    #[error("cannot render {artifact}: {reason}")]
    Render { artifact: String, reason: String },
}

impl ReportError {
    pub fn input(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn render(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Self::Render {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors that are answered with the usage text instead of a failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidMode(_) | Self::MissingInput(_))
    }
}
