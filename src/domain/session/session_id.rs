//! Opaque session identifier.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Entropy carried by a session identifier.
const TOKEN_BYTES: usize = 32;

/// Length of the base64url text form of a session identifier.
const ENCODED_LEN: usize = 43;

/// Unique identifier for a server-side session.
///
/// 256 bits drawn from the thread-local CSPRNG, carried as unpadded
/// base64url. Independent of any cookie key material.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a new random SessionId.
    pub fn generate() -> Self {
        let random_bytes: [u8; TOKEN_BYTES] = rand::rng().random();
        Self(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The text is not a well-formed session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid session identifier")]
pub struct ParseSessionIdError;

impl FromStr for SessionId {
    type Err = ParseSessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ENCODED_LEN {
            return Err(ParseSessionIdError);
        }
        let bytes = URL_SAFE_NO_PAD.decode(s).map_err(|_| ParseSessionIdError)?;
        if bytes.len() != TOKEN_BYTES {
            return Err(ParseSessionIdError);
        }
        Ok(Self(s.to_string()))
    }
}
