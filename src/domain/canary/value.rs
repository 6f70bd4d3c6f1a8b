//! The canary value.

/// Known marker value issued through every cookie and the session.
///
/// Opaque bytes supplied by configuration, immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanaryValue(Vec<u8>);

impl CanaryValue {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `candidate` is exactly this canary.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.0 == candidate
    }
}

impl From<String> for CanaryValue {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for CanaryValue {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_bytes_only() {
        let canary = CanaryValue::from("abc123");
        assert!(canary.matches(b"abc123"));
        assert!(!canary.matches(b"abc1234"));
        assert!(!canary.matches(b"ABC123"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let canary = CanaryValue::from(String::new());
        assert!(canary.is_empty());
        assert!(canary.matches(b""));
    }
}
