//! Codec error types.

use thiserror::Error;

/// A signed or encrypted value failed verification.
///
/// Raised for client-supplied data only; never a server fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// The wire value does not have the expected envelope structure.
    #[error("Malformed cookie value: {0}")]
    Malformed(&'static str),

    /// The HMAC tag does not match the payload.
    #[error("Cookie signature mismatch")]
    InvalidSignature,

    /// AEAD decryption rejected the ciphertext.
    #[error("Cookie authentication failed")]
    AuthenticationFailed,
}
