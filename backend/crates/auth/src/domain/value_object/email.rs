//! Email Value Object
//!
//! Emails are compared on their normalized form (trimmed, lower-cased), both
//! when stored at registration and when looked up at login. No format check is
//! applied beyond being non-blank.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Email address value object
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// Normalize raw input; blank input yields `None` (treated as absent)
    pub fn new(raw: &str) -> Option<Self> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            None
        } else {
            Some(Self(email))
        }
    }

    /// Normalize an optional field from a request body
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::new)
    }

    /// Create from database value (assumed already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
