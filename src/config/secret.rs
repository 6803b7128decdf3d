// src/config/secret.rs
use serde::Deserialize;
use std::fmt;

const REDACTED: &str = "***";

/// A string that must not leak into logs or error messages.
///
/// The only way to read the value is [`SecretString::expose_secret`]. `Debug`
/// and `Display` print a placeholder, and there is deliberately no
/// `Serialize` impl.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every occurrence of the secret in `text` with a placeholder.
    pub fn scrub(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        text.replace(&self.0, REDACTED)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretString").field(&REDACTED).finish()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = SecretString::new("123456:ABC-DEF");

        assert_eq!(format!("{:?}", secret), "SecretString(\"***\")");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret.expose_secret(), "123456:ABC-DEF");
    }

    #[test]
    fn test_scrub_replaces_every_occurrence() {
        let secret = SecretString::new("tok");
        let scrubbed = secret.scrub("GET /bottok/getMe failed for tok");

        assert_eq!(scrubbed, "GET /bot***/getMe failed for ***");
    }

    #[test]
    fn test_scrub_with_empty_secret_is_identity() {
        let secret = SecretString::default();
        assert_eq!(secret.scrub("nothing to hide"), "nothing to hide");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let secret: SecretString = serde_json::from_str("\"s3cr3t\"").unwrap();
        assert_eq!(secret.expose_secret(), "s3cr3t");
    }
}
