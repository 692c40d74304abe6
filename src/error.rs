//! Error types for avatar synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all avatar synthesis operations
#[derive(Debug)]
pub enum AvatarError {
    /// Builder or random-source configuration violates a documented precondition
    InvalidArgument {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Asset part category or file is missing or unreadable
    AssetNotFound {
        /// Path of the missing or unreadable asset
        path: PathBuf,
        /// Description of what went wrong
        reason: String,
    },

    /// Folder cache read or write failure
    CacheIo {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Rendering surface operation failure
    Surface {
        /// Name of the surface operation
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to encode the final pixel buffer as PNG
    Encode {
        /// Underlying image encoding error
        source: image::ImageError,
    },
}

impl fmt::Display for AvatarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::AssetNotFound { path, reason } => {
                write!(f, "Asset not found at '{}': {reason}", path.display())
            }
            Self::CacheIo {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Cache I/O error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Surface { operation, reason } => {
                write!(f, "Surface error in {operation}: {reason}")
            }
            Self::Encode { source } => {
                write!(f, "Failed to encode image: {source}")
            }
        }
    }
}

impl std::error::Error for AvatarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CacheIo { source, .. } => Some(source),
            Self::Encode { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for avatar synthesis results
pub type Result<T> = std::result::Result<T, AvatarError>;

/// Create an invalid parameter error
pub fn invalid_argument(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AvatarError {
    AvatarError::InvalidArgument {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an asset lookup error
pub fn asset_not_found(path: impl Into<PathBuf>, reason: &impl ToString) -> AvatarError {
    AvatarError::AssetNotFound {
        path: path.into(),
        reason: reason.to_string(),
    }
}
