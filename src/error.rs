//! Error types for the conversion pipeline.
//!
//! Every stage returns [`Result`]; the binary decides exit status and
//! message formatting.

use std::fmt;
use std::path::PathBuf;

/// Which of the two coordinate columns a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Column 0.
    Latitude,
    /// Column 1.
    Longitude,
}

impl Field {
    /// Zero-based CSV column holding this field.
    pub fn column(self) -> usize {
        match self {
            Field::Latitude => 0,
            Field::Longitude => 1,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Latitude => write!(f, "latitude (column 0)"),
            Field::Longitude => write!(f, "longitude (column 1)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input or output file could not be opened, read or written.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A row does not have the shape `<latitude>,<longitude>`.
    #[error("row {row}: {reason}")]
    Format { row: u64, reason: String },

    /// A coordinate field is not a finite decimal number.
    #[error("row {row}: {field} value {text:?} is not a valid number")]
    Parse { row: u64, field: Field, text: String },

    /// The document could not be encoded.
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A written document could not be read back as a point collection.
    #[error("failed to decode document: {reason}")]
    Decode { reason: String },

    /// A point read back from the output differs from its source row.
    #[error("feature {index} decoded as {found:?}, expected {expected:?}")]
    Verification {
        index: usize,
        expected: (f64, f64),
        found: (f64, f64),
    },

    /// The written document holds a different number of features than rows read.
    #[error("output has {found} features, expected {expected}")]
    FeatureCount { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(row: u64, reason: impl Into<String>) -> Self {
        Self::Format {
            row,
            reason: reason.into(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}
