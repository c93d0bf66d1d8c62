//! `X-Line-Signature` verification.
//!
//! The signature is base64(HMAC-SHA256(channel secret, raw request body)).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(channel_secret: &str, body: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(mac)
}

/// Compute the signature LINE would send for `body`.
///
/// Empty if the secret cannot key the MAC; an empty signature never verifies.
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    keyed_mac(channel_secret, body)
        .map(|mac| STANDARD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Check `signature` against `body`. Constant-time comparison.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };

    let Some(mac) = keyed_mac(channel_secret, body) else {
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "channel-secret";
    const BODY: &[u8] = br#"{"destination":"U0","events":[]}"#;

    #[test]
    fn signed_body_verifies() {
        let signature = sign(SECRET, BODY);
        assert!(verify_signature(SECRET, BODY, &signature));
    }

    #[test]
    fn known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let signature = sign("key", b"The quick brown fox jumps over the lazy dog");
        assert_eq!(signature, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn tampered_body_rejected() {
        let signature = sign(SECRET, BODY);
        assert!(!verify_signature(SECRET, br#"{"destination":"U1","events":[]}"#, &signature));
    }

    #[test]
    fn wrong_secret_rejected() {
        let signature = sign("other-secret", BODY);
        assert!(!verify_signature(SECRET, BODY, &signature));
    }

    #[test]
    fn empty_and_non_base64_signatures_rejected() {
        assert!(!verify_signature(SECRET, BODY, ""));
        assert!(!verify_signature(SECRET, BODY, "not base64!!"));
    }

    #[test]
    fn empty_secret_still_signs() {
        let signature = sign("", BODY);
        assert!(!signature.is_empty());
        assert!(verify_signature("", BODY, &signature));
        assert!(!verify_signature(SECRET, BODY, &signature));
    }

    #[test]
    fn truncated_signature_rejected() {
        let signature = sign(SECRET, BODY);
        let short = STANDARD.encode(&STANDARD.decode(&signature).unwrap()[..16]);
        assert!(!verify_signature(SECRET, BODY, &short));
    }
}
