//! Error types for stylize-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stylize-rs operations.
pub type Result<T> = std::result::Result<T, StylizeError>;

/// Errors that can occur during model loading and evaluation.
#[derive(Debug, Error)]
pub enum StylizeError {
    /// The model stream was malformed or the runtime failed to deserialize it.
    ///
    /// Carries the runtime error unmodified as the source.
    #[error("Model loading failed: {0}")]
    Load(#[source] ort::Error),

    /// Binding or execution failed inside the runtime.
    ///
    /// Carries the runtime error unmodified as the source.
    #[error("Evaluation failed: {0}")]
    Evaluation(#[source] ort::Error),

    /// Invalid tensor.
    #[error("Invalid tensor: {0}")]
    Tensor(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl StylizeError {
    /// Create a tensor error.
    pub fn tensor(msg: impl Into<String>) -> Self {
        Self::Tensor(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StylizeError::tensor("output rank mismatch");
        assert_eq!(format!("{}", err), "Invalid tensor: output rank mismatch");

        let err = StylizeError::config("invalid device");
        assert_eq!(format!("{}", err), "Configuration error: invalid device");

        let err = StylizeError::FileNotFound(PathBuf::from("/path/to/wave.onnx"));
        assert_eq!(format!("{}", err), "File not found: /path/to/wave.onnx");
    }
}
