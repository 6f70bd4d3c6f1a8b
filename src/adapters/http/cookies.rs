//! Cookie transport: `Set-Cookie` formatting and `Cookie` header parsing.
//!
//! Wire values coming out of the codec are byte strings. Plain values may
//! hold bytes that are not legal in a cookie value, so they are
//! percent-encoded on the way out and percent-decoded on the way in. Signed
//! and encrypted values are base64url and pass through unchanged.

use std::collections::HashMap;

use http::{header, HeaderMap};
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, CONTROLS};

pub use crate::domain::session::DEFAULT_SESSION_COOKIE;

/// Bytes escaped in outbound cookie values. Non-ASCII is always escaped.
const COOKIE_VALUE_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// Attributes applied to every cookie the service sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Name of the cookie carrying the session identifier.
    pub session_cookie_name: String,
    /// Lifetime of the session cookie, matching the store TTL.
    pub session_max_age_secs: u64,
    /// Adds the `Secure` attribute.
    pub secure: bool,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            session_max_age_secs: 86_400,
            secure: false,
        }
    }
}

impl CookiePolicy {
    /// Formats a `Set-Cookie` line for a codec wire value.
    pub fn set_cookie(&self, name: &str, wire: &[u8]) -> String {
        self.format(name, &encode_cookie_value(wire), None)
    }

    /// Formats the `Set-Cookie` line for the session identifier.
    pub fn session_cookie(&self, session_id: &str) -> String {
        self.format(
            &self.session_cookie_name,
            session_id,
            Some(self.session_max_age_secs),
        )
    }

    /// Formats a `Set-Cookie` line that tells the client to drop the session cookie.
    pub fn expired_session_cookie(&self) -> String {
        self.format(&self.session_cookie_name, "", Some(0))
    }

    fn format(&self, name: &str, value: &str, max_age: Option<u64>) -> String {
        let secure_flag = if self.secure { "; Secure" } else { "" };
        let max_age = max_age
            .map(|secs| format!("; Max-Age={secs}"))
            .unwrap_or_default();
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax{secure_flag}{max_age}")
    }
}

/// Percent-encodes bytes that may not appear in a cookie value.
pub fn encode_cookie_value(wire: &[u8]) -> String {
    percent_encode(wire, COOKIE_VALUE_UNSAFE).to_string()
}

/// Collects inbound cookies, percent-decoded.
///
/// All `Cookie` headers are read. When a name repeats, the first value wins.
pub fn parse_cookie_header(headers: &HeaderMap) -> HashMap<String, Vec<u8>> {
    let mut cookies = HashMap::new();

    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };

        for pair in value.split(';') {
            let Some((name, raw)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies
                .entry(name.to_string())
                .or_insert_with(|| percent_decode_str(raw.trim()).collect::<Vec<u8>>());
        }
    }

    cookies
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn set_cookie_has_expected_attributes() {
        let policy = CookiePolicy::default();

        assert_eq!(
            policy.set_cookie("regular", b"abc123"),
            "regular=abc123; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn secure_policy_adds_secure_flag() {
        let policy = CookiePolicy {
            secure: true,
            ..CookiePolicy::default()
        };

        assert!(policy.set_cookie("regular", b"x").ends_with("; Secure"));
    }

    #[test]
    fn session_cookie_carries_max_age() {
        let policy = CookiePolicy {
            session_max_age_secs: 120,
            ..CookiePolicy::default()
        };

        assert_eq!(
            policy.session_cookie("abc"),
            "_canary_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=120"
        );
    }

    #[test]
    fn expired_session_cookie_has_zero_max_age() {
        let policy = CookiePolicy::default();

        let line = policy.expired_session_cookie();

        assert!(line.starts_with("_canary_session=;"));
        assert!(line.ends_with("Max-Age=0"));
    }

    #[test]
    fn unsafe_bytes_are_escaped() {
        assert_eq!(encode_cookie_value(b"a b;c,d\"e\\f%g"), "a%20b%3Bc%2Cd%22e%5Cf%25g");
        assert_eq!(encode_cookie_value(&[0x00, 0xff]), "%00%FF");
        assert_eq!(encode_cookie_value("é".as_bytes()), "%C3%A9");
    }

    #[test]
    fn base64url_wire_values_pass_through() {
        let wire = b"YWJjMTIz.q-_Z09aZ";
        assert_eq!(encode_cookie_value(wire), "YWJjMTIz.q-_Z09aZ");
    }

    #[test]
    fn parses_multiple_cookies() {
        let headers = headers_with(&["regular=abc123; signed=YWJjMTIz.sig"]);

        let cookies = parse_cookie_header(&headers);

        assert_eq!(cookies.get("regular"), Some(&b"abc123".to_vec()));
        assert_eq!(cookies.get("signed"), Some(&b"YWJjMTIz.sig".to_vec()));
    }

    #[test]
    fn parsing_reverses_encoding() {
        let raw = b"a b;c\x00\xff";
        let cookie = format!("regular={}", encode_cookie_value(raw));
        let headers = headers_with(&[cookie.as_str()]);

        let cookies = parse_cookie_header(&headers);

        assert_eq!(cookies.get("regular"), Some(&raw.to_vec()));
    }

    #[test]
    fn reads_every_cookie_header_and_first_value_wins() {
        let headers = headers_with(&["regular=first", "regular=second; signed=s"]);

        let cookies = parse_cookie_header(&headers);

        assert_eq!(cookies.get("regular"), Some(&b"first".to_vec()));
        assert_eq!(cookies.get("signed"), Some(&b"s".to_vec()));
    }

    #[test]
    fn ignores_malformed_pairs() {
        let headers = headers_with(&["novalue; =orphan; ok=1"]);

        let cookies = parse_cookie_header(&headers);

        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("ok"), Some(&b"1".to_vec()));
    }

    #[test]
    fn empty_value_is_kept() {
        let headers = headers_with(&["regular="]);

        let cookies = parse_cookie_header(&headers);

        assert_eq!(cookies.get("regular"), Some(&Vec::new()));
    }
}
