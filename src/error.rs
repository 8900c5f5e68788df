// Typed error kinds for the renamer
// Everything else flows through anyhow with context

use std::path::PathBuf;

/// Errors with distinct handling at the orchestrator boundary.
///
/// `Configuration` aborts startup; the per-file kinds are recorded in the
/// batch report and the run continues.
#[derive(Debug, Clone)]
pub enum RenamerError {
    /// Registry is missing required columns or has no header row
    Configuration(String),

    /// The file to rename does not exist
    FileNotFound(PathBuf),

    /// Document status was neither "draft" nor "executed"
    InvalidStatus(String),
}

impl std::fmt::Display for RenamerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenamerError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            RenamerError::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            RenamerError::InvalidStatus(value) => write!(
                f,
                "Document status must be either 'draft' or 'executed', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for RenamerError {}
