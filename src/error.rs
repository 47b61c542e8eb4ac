//! Global error handling for filtergen
//!
//! This module provides a centralized error type covering every failure a
//! generator run can hit: layout problems, scan failures and output failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for filtergen operations
#[derive(Error, Debug)]
pub enum FilterGenError {
    /// File system errors not tied to a specific phase
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A scanned subdirectory is missing or unreadable
    #[error("Failed to scan directory {}: {source}", path.display())]
    ScanDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest could not be written to its destination
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layout file could not be parsed
    #[error("Layout error: {0}")]
    Layout(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for filtergen operations
pub type Result<T> = std::result::Result<T, FilterGenError>;

/// Creates a FilterGenError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FilterGenError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl FilterGenError {
    /// The io::ErrorKind that best describes this error
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Io(e) => e.kind(),
            Self::ScanDirectory { source, .. } | Self::Output { source, .. } => source.kind(),
            Self::Config(_) | Self::Layout(_) | Self::InvalidArgument(_) => {
                io::ErrorKind::InvalidInput
            }
        }
    }
}

// Lets the binary keep an io::Result main
impl From<FilterGenError> for io::Error {
    fn from(err: FilterGenError) -> Self {
        io::Error::new(err.kind(), err.to_string())
    }
}
