//! Error types for the Encore client.

use thiserror::Error;

/// A shared error type for the entire Encore client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum EncoreError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Backend gateway error (transport failure or non-success status)
    #[error("Gateway error during {operation}: {message}")]
    Gateway { operation: String, message: String },

    /// The backend returned a payload the client cannot interpret
    #[error("Malformed {operation} response: {message}")]
    MalformedResponse { operation: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation failure, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment flow failure, naming the step that aborted the attempt
    #[error("Payment failed at {step}: {message}")]
    Payment { step: &'static str, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EncoreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Gateway error for the given operation
    pub fn gateway(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Gateway {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error for the given operation
    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Payment error for the given step
    pub fn payment(step: &'static str, message: impl Into<String>) -> Self {
        Self::Payment {
            step,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Gateway (transport/status) error
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Payment error
    pub fn is_payment(&self) -> bool {
        matches!(self, Self::Payment { .. })
    }

    /// Whether the failure is recoverable for the cart session.
    ///
    /// Gateway errors are transient from the session's perspective: the
    /// stored cart identifier is retained and the user may retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Gateway { .. } | Self::MalformedResponse { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EncoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EncoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EncoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for EncoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Gateway {
            operation: err
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_else(|| "request".to_string()),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EncoreError>`.
pub type Result<T> = std::result::Result<T, EncoreError>;
