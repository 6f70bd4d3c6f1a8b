//! Cookie key configuration
//!
//! Key material comes from exactly one source:
//! - `secret_key_base`, from which signing and cipher keys are derived
//! - `signing_key` plus `encryption_key`, both standard base64

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::cookie::KeyMaterial;

/// Cookie key configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct KeysConfig {
    /// Master secret for key derivation
    pub secret_key_base: Option<SecretString>,

    /// Explicit HMAC key (base64)
    pub signing_key: Option<SecretString>,

    /// Explicit AES-256-GCM key (base64, 32 bytes decoded)
    pub encryption_key: Option<SecretString>,
}

impl KeysConfig {
    /// Build key material from whichever source is configured.
    pub fn key_material(&self) -> Result<KeyMaterial, ValidationError> {
        let explicit = self.signing_key.is_some() || self.encryption_key.is_some();

        match (&self.secret_key_base, explicit) {
            (Some(_), true) => Err(ValidationError::AmbiguousKeySource),
            (Some(secret), false) => Ok(KeyMaterial::derive(secret.expose_secret().as_bytes())?),
            (None, true) => {
                let signing = decode_key(&self.signing_key, "keys.signing_key")?;
                let encryption = decode_key(&self.encryption_key, "keys.encryption_key")?;
                Ok(KeyMaterial::from_parts(&signing, &encryption)?)
            }
            (None, false) => Err(ValidationError::MissingRequired("SECRET_KEY_BASE")),
        }
    }

    /// Validate key configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.key_material().map(|_| ())
    }
}

fn decode_key(
    key: &Option<SecretString>,
    name: &'static str,
) -> Result<Vec<u8>, ValidationError> {
    let key = key.as_ref().ok_or(ValidationError::MissingRequired(name))?;
    STANDARD
        .decode(key.expose_secret().trim())
        .map_err(|_| ValidationError::InvalidKeyEncoding(name))
}
