//! Cookie value codec.
//!
//! Wire formats:
//! - Plain: the raw bytes, untouched
//! - Signed: `base64url(raw) "." base64url(HMAC-SHA256(mac_key, raw))`
//! - Encrypted: `base64url(nonce || ciphertext || tag)` with AES-256-GCM
//!
//! base64url is unpadded. Percent-encoding of cookie-unsafe bytes is the
//! transport's job, not the codec's.

use aes_gcm::aead::{Aead, AeadCore, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::IntegrityError;
use super::keys::KeyMaterial;
use super::mode::ProtectionMode;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: u8 = b'.';
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Encodes a raw value for the wire under the given protection mode.
///
/// Plain and Signed are deterministic. Encrypted draws a fresh nonce per
/// call, so two encodings of the same value differ.
pub fn encode(mode: ProtectionMode, raw: &[u8], keys: &KeyMaterial) -> Vec<u8> {
    match mode {
        ProtectionMode::Plain => raw.to_vec(),
        ProtectionMode::Signed => sign(raw, keys).into_bytes(),
        ProtectionMode::Encrypted => encrypt(raw, keys).into_bytes(),
    }
}

/// Recovers the raw value from a wire value.
///
/// # Errors
///
/// Returns `IntegrityError` when a Signed or Encrypted value is malformed,
/// carries a bad signature, or fails AEAD authentication. Plain never fails.
pub fn decode(
    mode: ProtectionMode,
    wire: &[u8],
    keys: &KeyMaterial,
) -> Result<Vec<u8>, IntegrityError> {
    match mode {
        ProtectionMode::Plain => Ok(wire.to_vec()),
        ProtectionMode::Signed => verify(wire, keys),
        ProtectionMode::Encrypted => decrypt(wire, keys),
    }
}

fn sign(raw: &[u8], keys: &KeyMaterial) -> String {
    let tag = compute_mac(raw, keys);
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(raw),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

fn verify(wire: &[u8], keys: &KeyMaterial) -> Result<Vec<u8>, IntegrityError> {
    let mut parts = wire.split(|b| *b == SEPARATOR);
    let (payload, tag) = match (parts.next(), parts.next(), parts.next()) {
        (Some(payload), Some(tag), None) => (payload, tag),
        _ => return Err(IntegrityError::Malformed("expected payload.signature")),
    };

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| IntegrityError::Malformed("payload is not base64url"))?;
    let tag = URL_SAFE_NO_PAD
        .decode(tag)
        .map_err(|_| IntegrityError::Malformed("signature is not base64url"))?;

    let expected = compute_mac(&raw, keys);
    if !constant_time_compare(&expected, &tag) {
        return Err(IntegrityError::InvalidSignature);
    }

    Ok(raw)
}

fn encrypt(raw: &[u8], keys: &KeyMaterial) -> String {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = keys
        .cipher()
        .encrypt(&nonce, raw)
        .expect("AES-GCM encryption failed");

    let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    combined.extend_from_slice(&nonce);
    combined.extend_from_slice(&ciphertext);

    URL_SAFE_NO_PAD.encode(&combined)
}

fn decrypt(wire: &[u8], keys: &KeyMaterial) -> Result<Vec<u8>, IntegrityError> {
    let combined = URL_SAFE_NO_PAD
        .decode(wire)
        .map_err(|_| IntegrityError::Malformed("envelope is not base64url"))?;

    if combined.len() < NONCE_LEN + TAG_LEN {
        return Err(IntegrityError::Malformed("envelope too short"));
    }

    let (nonce, ciphertext) = combined.split_at(NONCE_LEN);
    keys.cipher()
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| IntegrityError::AuthenticationFailed)
}

fn compute_mac(raw: &[u8], keys: &KeyMaterial) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(keys.mac_key()).expect("HMAC accepts any key");
    mac.update(raw);
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
