//! Error types and handling for the load board service

use thiserror::Error;

/// Main error type for the load board service
#[derive(Error, Debug)]
pub enum LoadBoardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors talking to external services (recommendations, backend loads)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Profile store / cache operation errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Lookup misses for loads and bookings
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl LoadBoardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LoadBoardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            LoadBoardError::Api { .. } => {
                "Unable to reach the load services. Please check your connection.".to_string()
            }
            LoadBoardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            LoadBoardError::Store { .. } => {
                "Profile store operation failed. You may need to clear the local store."
                    .to_string()
            }
            LoadBoardError::NotFound { message } => message.clone(),
            LoadBoardError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            LoadBoardError::General { message } => message.clone(),
        }
    }
}
