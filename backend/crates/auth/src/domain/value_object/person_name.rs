//! Person Name Value Object
//!
//! First and last names: trimmed, never blank.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[display("{_0}")]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        assert_eq!(PersonName::new("  Amal ").unwrap().as_str(), "Amal");
        assert!(PersonName::new("").is_none());
        assert!(PersonName::new(" \t ").is_none());
    }
}
