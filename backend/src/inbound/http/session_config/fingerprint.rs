//! Short, non-reversible fingerprint of the session key.
//!
//! Logged at start-up so operators can tell which key a node is using.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Hex-encode the first eight bytes of the SHA-256 digest of the signing key.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use rentease::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fingerprint = key_fingerprint(&Key::generate());
/// assert_eq!(fingerprint.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}
