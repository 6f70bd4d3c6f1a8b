//! Cookie protection modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a cookie value is protected on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionMode {
    /// Value is sent as-is.
    Plain,
    /// Value is readable but carries an HMAC tag.
    Signed,
    /// Value is sealed with an AEAD cipher.
    Encrypted,
}

impl ProtectionMode {
    /// All modes, in the order cookies are issued.
    pub const ALL: [ProtectionMode; 3] = [
        ProtectionMode::Plain,
        ProtectionMode::Signed,
        ProtectionMode::Encrypted,
    ];

    /// Name of the cookie that carries the canary for this mode.
    pub fn cookie_name(&self) -> &'static str {
        match self {
            ProtectionMode::Plain => "regular",
            ProtectionMode::Signed => "signed",
            ProtectionMode::Encrypted => "encrypted",
        }
    }

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionMode::Plain => "plain",
            ProtectionMode::Signed => "signed",
            ProtectionMode::Encrypted => "encrypted",
        }
    }
}

impl fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_names_match_wire_contract() {
        assert_eq!(ProtectionMode::Plain.cookie_name(), "regular");
        assert_eq!(ProtectionMode::Signed.cookie_name(), "signed");
        assert_eq!(ProtectionMode::Encrypted.cookie_name(), "encrypted");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ProtectionMode::Encrypted).unwrap();
        assert_eq!(json, "\"encrypted\"");
    }
}
