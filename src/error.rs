//! Global error handling for structify
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for structify operations
#[derive(Error, Debug)]
pub enum StructifyError {
    /// File system errors raised while listing directories or reading files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `.gitignore` rule could not be compiled
    #[error("Gitignore error: {0}")]
    Gitignore(#[from] ignore::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Interactive input ended or could not be understood
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl StructifyError {
    /// Whether this error was raised before any traversal started
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::PathNotFound(_) | Self::InvalidArgument(_)
        )
    }
}

/// Specialized Result type for structify operations
pub type Result<T> = std::result::Result<T, StructifyError>;

/// Creates a StructifyError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::StructifyError::$error_type(format!($($arg)*))
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
