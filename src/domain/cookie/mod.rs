//! Cookie protection domain.
//!
//! Three protection modes are supported:
//! - `Plain` - the wire value is the raw value
//! - `Signed` - readable but tamper-evident (HMAC-SHA256)
//! - `Encrypted` - neither readable nor forgeable (AES-256-GCM)
//!
//! The codec is stateless; key material is passed in on every call.

pub mod codec;
mod errors;
mod keys;
mod mode;
mod protected_cookie;

pub use codec::{decode, encode};
pub use errors::IntegrityError;
pub use keys::{KeyMaterial, KeyMaterialError, CIPHER_KEY_LEN, MIN_SECRET_LEN};
pub use mode::ProtectionMode;
pub use protected_cookie::ProtectedCookie;
