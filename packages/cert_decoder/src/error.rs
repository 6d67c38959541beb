//! Error handling for certificate decoding

use thiserror::Error;

/// Certificate decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertError {
    /// A read asked for more bytes than remain
    #[error("Truncated input at offset {offset}: needed {needed} byte(s), {remaining} remaining")]
    Truncated {
        /// Read position when the read failed
        offset: usize,
        /// Bytes the read asked for
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// The PEM body is not valid Base64
    #[error("Invalid base64 in PEM body: {0}")]
    InvalidBase64(String),

    /// The PEM text has no certificate body
    #[error("Invalid PEM input: {0}")]
    InvalidPem(String),

    /// Bytes are present but cannot be interpreted
    #[error("Malformed {field}: {reason}")]
    MalformedField {
        /// Field being decoded
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The decoder configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CertError {
    /// Create a malformed field error
    #[must_use]
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from running out of input.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

impl From<base64::DecodeError> for CertError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidBase64(err.to_string())
    }
}

/// Result type for certificate decoding
pub type Result<T> = std::result::Result<T, CertError>;
