//! Error types for seo-tagger
//!
//! Error strategy:
//! - Per-item errors (`TagError`): isolated to one file, the batch continues
//! - Field errors (`FieldError`): corrected while building the metadata record
//! - Application errors (`AppError`): only the CLI front end can abort on these

use std::path::PathBuf;
use thiserror::Error;

/// Formats the tag engine can write, for error messages
pub const SUPPORTED_FORMATS: &str = "MPEG audio (MP3, MP2, MP1), WAV, AIFF";

/// Failure to rewrite the tag of a single audio item
#[derive(Debug, Error)]
pub enum TagError {
    #[error("unreadable audio container: {0}")]
    UnreadableContainer(String),

    #[error("unsupported format '{format}': no ID3v2 tag facility (supported: {SUPPORTED_FORMATS})")]
    UnsupportedFormat { format: String },

    #[error("failed to serialize ID3v2 tag: {0}")]
    Encode(#[from] id3::Error),
}

/// Invalid field input, recovered at the edge of the field model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("rating {0} is outside 1..=5")]
    InvalidRating(i64),
}

/// Top-level error type for the command-line front end
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read metadata file '{path}': {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse metadata file '{path}': {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No audio files found in the given inputs")]
    NoInputs,

    #[error("Input not found: '{0}'")]
    InputNotFound(PathBuf),

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    Output { path: PathBuf, reason: String },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for front-end operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message_names_format() {
        let err = TagError::UnsupportedFormat {
            format: "flac".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("flac"));
        assert!(msg.contains("MPEG"));
        assert!(msg.contains("WAV"));
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(
            FieldError::InvalidYear("abcd".to_string()).to_string(),
            "invalid year 'abcd'"
        );
        assert_eq!(
            FieldError::InvalidRating(9).to_string(),
            "rating 9 is outside 1..=5"
        );
    }
}
