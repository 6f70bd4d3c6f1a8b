//! A named cookie value sealed under a protection mode.

use super::codec;
use super::keys::KeyMaterial;
use super::mode::ProtectionMode;

/// A cookie whose wire value was produced by the codec.
///
/// The wire value always round-trips to the sealed value under the same
/// mode and key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedCookie {
    name: &'static str,
    mode: ProtectionMode,
    wire: Vec<u8>,
}

impl ProtectedCookie {
    /// Encodes `raw` under `mode`, naming the cookie after the mode.
    pub fn seal(mode: ProtectionMode, raw: &[u8], keys: &KeyMaterial) -> Self {
        Self {
            name: mode.cookie_name(),
            mode,
            wire: codec::encode(mode, raw, keys),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn mode(&self) -> ProtectionMode {
        self.mode
    }

    /// The encoded value, before transport percent-encoding.
    pub fn wire_value(&self) -> &[u8] {
        &self.wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> KeyMaterial {
        KeyMaterial::derive(b"protected-cookie-test-secret-0123456789").unwrap()
    }

    #[test]
    fn seal_uses_mode_cookie_name() {
        let keys = test_keys();
        for mode in ProtectionMode::ALL {
            let cookie = ProtectedCookie::seal(mode, b"abc123", &keys);
            assert_eq!(cookie.name(), mode.cookie_name());
            assert_eq!(cookie.mode(), mode);
        }
    }

    #[test]
    fn sealed_cookie_decodes_to_raw_value() {
        let keys = test_keys();
        for mode in ProtectionMode::ALL {
            let cookie = ProtectedCookie::seal(mode, b"correct-horse-battery-staple", &keys);
            let raw = codec::decode(cookie.mode(), cookie.wire_value(), &keys).unwrap();
            assert_eq!(raw, b"correct-horse-battery-staple");
        }
    }

    #[test]
    fn plain_wire_value_equals_raw() {
        let cookie = ProtectedCookie::seal(ProtectionMode::Plain, b"abc123", &test_keys());
        assert_eq!(cookie.wire_value(), b"abc123");
    }
}
