//! Process-wide key material for signed and encrypted cookies.
//!
//! Key material is built once at startup, either derived from a single
//! secret key base with HKDF-SHA256 or supplied as two explicit keys.
//! It is read-only afterwards and shared across requests without locking.

use aes_gcm::{Aes256Gcm, KeyInit};
use hkdf::Hkdf;
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

/// Minimum length for a secret key base or an explicit signing key.
pub const MIN_SECRET_LEN: usize = 32;

/// AES-256 key length.
pub const CIPHER_KEY_LEN: usize = 32;

/// Length of the derived HMAC key (one SHA-256 block).
const MAC_KEY_LEN: usize = 64;

/// HKDF info label for the signing key.
const SIGNED_COOKIE_LABEL: &[u8] = b"signed cookie";

/// HKDF info label for the encryption key.
const ENCRYPTED_COOKIE_LABEL: &[u8] = b"authenticated encrypted cookie";

/// Errors building key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyMaterialError {
    #[error("Secret key base must be at least {MIN_SECRET_LEN} bytes")]
    SecretTooShort,

    #[error("Signing key must be at least {MIN_SECRET_LEN} bytes")]
    SigningKeyTooShort,

    #[error("Encryption key must be exactly {CIPHER_KEY_LEN} bytes, got {0}")]
    InvalidEncryptionKeyLength(usize),
}

/// MAC key and cipher used by the codec.
#[derive(Clone)]
pub struct KeyMaterial {
    mac_key: Vec<u8>,
    cipher: Aes256Gcm,
}

impl KeyMaterial {
    /// Derives independent signing and encryption keys from one secret.
    ///
    /// # Errors
    ///
    /// Returns `KeyMaterialError::SecretTooShort` if the secret is shorter
    /// than [`MIN_SECRET_LEN`].
    pub fn derive(secret_key_base: &[u8]) -> Result<Self, KeyMaterialError> {
        if secret_key_base.len() < MIN_SECRET_LEN {
            return Err(KeyMaterialError::SecretTooShort);
        }

        let hk = Hkdf::<Sha256>::new(None, secret_key_base);

        let mut mac_key = vec![0u8; MAC_KEY_LEN];
        hk.expand(SIGNED_COOKIE_LABEL, &mut mac_key)
            .expect("64 bytes is a valid HKDF-SHA256 output length");

        let mut cipher_key = [0u8; CIPHER_KEY_LEN];
        hk.expand(ENCRYPTED_COOKIE_LABEL, &mut cipher_key)
            .expect("32 bytes is a valid HKDF-SHA256 output length");

        Self::from_parts(&mac_key, &cipher_key)
    }

    /// Builds key material from explicit signing and encryption keys.
    ///
    /// # Errors
    ///
    /// - `SigningKeyTooShort` if the signing key is shorter than [`MIN_SECRET_LEN`]
    /// - `InvalidEncryptionKeyLength` if the encryption key is not 32 bytes
    pub fn from_parts(signing_key: &[u8], encryption_key: &[u8]) -> Result<Self, KeyMaterialError> {
        if signing_key.len() < MIN_SECRET_LEN {
            return Err(KeyMaterialError::SigningKeyTooShort);
        }
        let cipher = Aes256Gcm::new_from_slice(encryption_key)
            .map_err(|_| KeyMaterialError::InvalidEncryptionKeyLength(encryption_key.len()))?;

        Ok(Self {
            mac_key: signing_key.to_vec(),
            cipher,
        })
    }

    pub(crate) fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }

    pub(crate) fn cipher(&self) -> &Aes256Gcm {
        &self.cipher
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef-test-secret";

    #[test]
    fn derive_rejects_short_secret() {
        let result = KeyMaterial::derive(b"too-short");
        assert_eq!(result.unwrap_err(), KeyMaterialError::SecretTooShort);
    }

    #[test]
    fn derive_is_deterministic() {
        let a = KeyMaterial::derive(SECRET).unwrap();
        let b = KeyMaterial::derive(SECRET).unwrap();
        assert_eq!(a.mac_key(), b.mac_key());
    }

    #[test]
    fn derived_mac_key_differs_from_secret() {
        let keys = KeyMaterial::derive(SECRET).unwrap();
        assert_eq!(keys.mac_key().len(), MAC_KEY_LEN);
        assert_ne!(keys.mac_key(), SECRET);
    }

    #[test]
    fn different_secrets_derive_different_keys() {
        let a = KeyMaterial::derive(SECRET).unwrap();
        let b = KeyMaterial::derive(b"another-secret-key-base-of-sufficient-length").unwrap();
        assert_ne!(a.mac_key(), b.mac_key());
    }

    #[test]
    fn from_parts_validates_lengths() {
        assert_eq!(
            KeyMaterial::from_parts(&[1u8; 16], &[2u8; 32]).unwrap_err(),
            KeyMaterialError::SigningKeyTooShort
        );
        assert_eq!(
            KeyMaterial::from_parts(&[1u8; 32], &[2u8; 16]).unwrap_err(),
            KeyMaterialError::InvalidEncryptionKeyLength(16)
        );
        assert!(KeyMaterial::from_parts(&[1u8; 32], &[2u8; 32]).is_ok());
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let keys = KeyMaterial::from_parts(&[0x41u8; 32], &[0x42u8; 32]).unwrap();
        let debug = format!("{:?}", keys);
        assert_eq!(debug, "KeyMaterial { .. }");
    }
}
