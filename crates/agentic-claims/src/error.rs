//! Error types for AgenticClaims.
//!
//! Codec errors abort a single encode/decode call and never carry a
//! partially verified object. Validation findings are not errors; they
//! are collected in [`crate::validation::ValidationResults`].
//! Private key material is never included in error messages.

/// Claims error types covering key handling and the credential codec.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Unsupported credential version: {0}")]
    UnsupportedVersion(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, ClaimsError>;
