//! Error types for wave2text

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wave2text operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wave2text
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse settings: {0}")]
    Serialize(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Pulse Shape Errors
    // -------------------------------------------------------------------------
    #[error("Invalid sample '{value}' on line {line} of '{path}'")]
    PulseParse {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Pulse shape file '{0}' contains no samples")]
    EmptyPulse(PathBuf),

    // -------------------------------------------------------------------------
    // Settings / Parameter Errors
    // -------------------------------------------------------------------------
    #[error("Invalid setting value for {key}: {reason}")]
    InvalidSettingValue { key: String, reason: String },

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Preset {0} not found")]
    PresetNotFound(usize),

    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Terminal Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Input closed")]
    InputClosed,
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::FileRead { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Error::PresetNotFound(_) => true,
            _ => false,
        }
    }

    /// Check if the terminal input reached end-of-file
    #[must_use]
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Error::InputClosed)
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns around std::fs.

use std::path::Path;

/// Create a directory (and parents) with proper error handling
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a whole file to a string with proper error handling
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write content to a file with proper error handling
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = read_file(Path::new("/nonexistent/wave2text/pulse.txt")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_input_closed());
    }

    #[test]
    fn test_pulse_parse_message() {
        let err = Error::PulseParse {
            path: PathBuf::from("pulse.txt"),
            line: 3,
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid sample 'abc' on line 3 of 'pulse.txt'"
        );
    }
}
