//! # Authentication
//!
//! The API authenticates every call with a Basic credential built from the
//! username and a password or API key.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A precomputed `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    header: String,
}

impl Credential {
    pub fn basic(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Self {
            header: format!("Basic {encoded}"),
        }
    }

    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_header_is_base64_of_pair() {
        let credential = Credential::basic("qa@example.com", "secret");
        assert_eq!(
            credential.header_value(),
            "Basic cWFAZXhhbXBsZS5jb206c2VjcmV0"
        );
    }

    #[test]
    fn debug_is_redacted() {
        let credential = Credential::basic("user", "pw");
        assert_eq!(format!("{credential:?}"), "Credential(<redacted>)");
    }
}
