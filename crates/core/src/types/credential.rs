//! Administrator credential type.
//!
//! The admin API authenticates with an HTTP Basic header derived from a
//! username/password pair. The encoding is reversible transport obfuscation,
//! not a security boundary - the value is exactly what goes on the wire.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

/// Scheme token prefixed to the encoded login pair.
const BASIC_SCHEME: &str = "Basic ";

/// An encoded administrator credential, ready to be attached as an
/// authorization header.
///
/// Invalidity is only discovered when the backend rejects a request; no
/// expiry is tracked client-side.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential(String);

impl AdminCredential {
    /// Derive a credential from a username/password login pair.
    ///
    /// Both parts are trimmed, joined as `username:password`, base64-encoded
    /// and prefixed with the `Basic` scheme token.
    #[must_use]
    pub fn from_login(username: &str, password: &SecretString) -> Self {
        let pair = format!(
            "{}:{}",
            username.trim(),
            password.expose_secret().trim()
        );
        Self(format!("{BASIC_SCHEME}{}", STANDARD.encode(pair)))
    }

    /// Wrap an already-encoded credential verbatim.
    #[must_use]
    pub fn from_encoded(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The value to attach as the authorization header.
    #[must_use]
    pub fn header_value(&self) -> &str {
        &self.0
    }

    /// Recover the `username:password` pair from an encoded credential.
    ///
    /// Returns `None` when the value does not carry the `Basic` scheme or
    /// does not decode to a `username:password` string.
    #[must_use]
    pub fn decode_login(&self) -> Option<(String, String)> {
        let encoded = self.0.strip_prefix(BASIC_SCHEME)?;
        let decoded = STANDARD.decode(encoded).ok()?;
        let pair = String::from_utf8(decoded).ok()?;
        let (username, password) = pair.split_once(':')?;
        Some((username.to_owned(), password.to_owned()))
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminCredential").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_login_encoding() {
        let credential =
            AdminCredential::from_login("alice", &SecretString::from("secret".to_string()));
        assert_eq!(
            credential.header_value(),
            format!("Basic {}", STANDARD.encode("alice:secret"))
        );
    }

    #[test]
    fn test_decode_recovers_login() {
        let credential =
            AdminCredential::from_login("alice", &SecretString::from("secret".to_string()));
        let (username, password) = credential.decode_login().expect("decodable");
        assert_eq!(username, "alice");
        assert_eq!(password, "secret");
    }

    #[test]
    fn test_login_is_trimmed() {
        let credential =
            AdminCredential::from_login("  alice ", &SecretString::from(" secret\n".to_string()));
        assert_eq!(
            credential.decode_login().expect("decodable"),
            ("alice".to_owned(), "secret".to_owned())
        );
    }

    #[test]
    fn test_from_encoded_is_verbatim() {
        let credential = AdminCredential::from_encoded("Basic YWxpY2U6c2VjcmV0");
        assert_eq!(credential.header_value(), "Basic YWxpY2U6c2VjcmV0");
    }

    #[test]
    fn test_decode_rejects_foreign_scheme() {
        let credential = AdminCredential::from_encoded("Bearer abcdef");
        assert!(credential.decode_login().is_none());
    }

    #[test]
    fn test_debug_redacts_value() {
        let credential =
            AdminCredential::from_login("alice", &SecretString::from("secret".to_string()));
        let debug_output = format!("{credential:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("YWxpY2U6c2VjcmV0"));
    }
}
