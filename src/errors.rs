/*!
 * Error types for the serename application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the episode database API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Requested series does not exist
    #[error("Series not found: {0}")]
    SeriesNotFound(String),
}

/// Errors raised while parsing a naming template
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// Placeholder name not in the recognized set
    #[error("Unknown placeholder '{{{0}}}' in naming template")]
    UnknownPlaceholder(String),

    /// A '{' without a matching '}'
    #[error("Unclosed placeholder in naming template at byte offset {0}")]
    UnclosedPlaceholder(usize),

    /// Width specifier that is not of the form ':0N'
    #[error("Invalid width specifier '{0}' in naming template")]
    InvalidWidth(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error in the application configuration, fatal before matching begins
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the episode database provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error in the naming template
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
