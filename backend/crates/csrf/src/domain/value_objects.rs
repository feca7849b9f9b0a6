//! Domain Value Objects

use std::fmt;

/// Per-browser session identifier (UUID v4) carried in the session cookie
pub type SessionId = kernel::id::CsrfSessionId;

/// Random salt length in bytes
pub const SALT_LEN: usize = 32;

/// MAC length in bytes (HMAC-SHA256)
pub const MAC_LEN: usize = platform::crypto::HMAC_SHA256_LEN;

/// Decoded token length: salt followed by MAC
pub const TOKEN_LEN: usize = SALT_LEN + MAC_LEN;

/// Encoded CSRF token as carried in headers, cookies and JSON bodies
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Wrap a presented value. Returns `None` for blank input.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub(crate) fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}
