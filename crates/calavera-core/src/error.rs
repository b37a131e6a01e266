//! Error taxonomy for a setup run

use crate::tools::Tool;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while rendering, writing or installing
#[derive(Debug, Error)]
pub enum SetupError {
    /// No `package.json` in the project root. The wizard offers to create one.
    #[error("No package.json found at {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// Reading, parsing or writing one of the artifacts failed
    #[error("Failed to add {artifact}")]
    ConfigWrite {
        artifact: String,
        #[source]
        source: io::Error,
    },

    /// The package manager could not be started or exited unsuccessfully
    #[error("{message}")]
    Install {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("Unknown tool '{0}'. Available tools: {available}", available = Tool::identifiers().join(", "))]
    UnknownTool(String),

    #[error("{0} and {1} cannot be selected together, pick one")]
    ConflictingTools(Tool, Tool),

    #[error("Prompt failed")]
    Prompt(#[from] io::Error),
}

impl SetupError {
    /// Wrap an I/O failure with the name of the artifact being written
    pub fn config_write(artifact: impl Into<String>, source: impl Into<io::Error>) -> Self {
        SetupError::ConfigWrite {
            artifact: artifact.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_write_keeps_cause() {
        let err = SetupError::config_write(
            "ESLint configuration",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        );
        assert_eq!(err.to_string(), "Failed to add ESLint configuration");
        assert_eq!(err.source().unwrap().to_string(), "read-only");
    }

    #[test]
    fn test_unknown_tool_lists_identifiers() {
        let err = SetupError::UnknownTool("rome".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'rome'"));
        assert!(msg.contains("tsconfig-noemit"));
    }
}
