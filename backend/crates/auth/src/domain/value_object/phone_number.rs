//! Phone Number Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Phone number as entered, trimmed
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{_0}")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Blank input yields `None` (treated as absent)
    pub fn new(raw: &str) -> Option<Self> {
        let phone = raw.trim();
        if phone.is_empty() {
            None
        } else {
            Some(Self(phone.to_string()))
        }
    }

    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::new)
    }

    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
