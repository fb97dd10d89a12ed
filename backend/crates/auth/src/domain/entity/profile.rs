//! Role Extension Records
//!
//! Every user owns exactly one extension, chosen by its role:
//! Admin (role 1) or Graduate (role 2).

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Admin extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub department: String,
}

/// Graduate extension; every field is required and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduateProfile {
    pub batch_number: String,
    pub institute: String,
    pub major: String,
    pub age: i32,
    pub region: String,
    pub graduation_date: String,
    pub national_id: String,
}

/// Validated role-specific registration data, discriminated by role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleProfile {
    Admin(AdminProfile),
    Graduate(GraduateProfile),
}

impl RoleProfile {
    pub fn role(&self) -> UserRole {
        match self {
            RoleProfile::Admin(_) => UserRole::Admin,
            RoleProfile::Graduate(_) => UserRole::Graduate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_role() {
        let admin = RoleProfile::Admin(AdminProfile {
            department: "IT".to_string(),
        });
        assert_eq!(admin.role(), UserRole::Admin);

        let graduate = RoleProfile::Graduate(GraduateProfile {
            batch_number: "1".to_string(),
            institute: "X".to_string(),
            major: "Y".to_string(),
            age: 20,
            region: "Z".to_string(),
            graduation_date: "2024-01-01".to_string(),
            national_id: "123".to_string(),
        });
        assert_eq!(graduate.role(), UserRole::Graduate);
    }
}
