use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary role tag. The numeric ids are part of the wire format and the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum UserRole {
    Admin = 1,
    Graduate = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Graduate => "graduate",
        }
    }

    #[inline]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Graduate),
            _ => None,
        }
    }
}

impl From<UserRole> for i16 {
    fn from(role: UserRole) -> Self {
        role.id()
    }
}

impl TryFrom<i16> for UserRole {
    type Error = String;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        UserRole::from_id(i64::from(id)).ok_or_else(|| format!("invalid role id: {id}"))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(1), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Graduate));
        assert_eq!(UserRole::from_id(0), None);
        assert_eq!(UserRole::from_id(3), None);
        assert_eq!(UserRole::from_id(-1), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Graduate.to_string(), "graduate");
    }

    #[test]
    fn test_user_role_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UserRole::Graduate).unwrap(), "2");
        assert_eq!(serde_json::from_str::<UserRole>("1").unwrap(), UserRole::Admin);
        assert!(serde_json::from_str::<UserRole>("7").is_err());
    }
}
