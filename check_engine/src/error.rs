//! Error types for the Pulse Check Engine.
//!
//! A failing verdict is never an error: it is a successfully computed
//! [`FileReport`](crate::types::FileReport) with `passed == false`. These
//! variants cover the cases where no verdict could be computed at all.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors that abort a single-file check or a whole scan.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Single-file mode was invoked without a usable filename.
    #[error("Please provide a file name, e.g.: pulse-check microfinance_dao.rs")]
    MissingFilename,

    /// A file could not be read.
    #[error("Error reading file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The base directory could not be listed.
    #[error("Error listing directory '{}': {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_message_includes_path() {
        let err = CheckError::ReadFile {
            path: PathBuf::from("contracts/missing.rs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("contracts/missing.rs"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = CheckError::from(ConfigError::UnknownProfile("solana".to_owned()));
        assert_eq!(err.to_string(), ConfigError::UnknownProfile("solana".to_owned()).to_string());
    }
}
