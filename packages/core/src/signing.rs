//! HMAC-SHA256 request signatures.
//!
//! The remote API authenticates every request by recomputing a signature
//! over the submitted fields with the installation's shared `api_secret`:
//!
//! ```text
//! canonical = key₁ ++ value₁ ++ key₂ ++ value₂ ++ …   (keys in ordinal byte order)
//! signature = lowercase_hex( HMAC-SHA256(api_secret, canonical) )
//! ```
//!
//! There are no separators between keys and values. The format is a deployed
//! contract and must be reproduced exactly.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::payload::Payload;

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature of `payload` under `secret`.
///
/// Deterministic, and independent of the order in which fields were
/// inserted. The payload must not already contain a `signature` field if the
/// result is meant to be sent; see [`crate::client::ApiClient::request`].
pub fn sign(payload: &Payload, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(canonical_string(payload).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Concatenate `key ++ value` for every field, in sorted key order.
pub fn canonical_string(payload: &Payload) -> String {
    let mut out = String::new();
    for (key, value) in payload.iter() {
        out.push_str(key);
        out.push_str(&value.to_string());
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
