//! User Entity
//!
//! Account record shared by both roles. Role-specific data lives in the
//! extension records in [`super::profile`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, person_name::PersonName, phone_number::PhoneNumber, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    /// Assigned by the store on insert
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Unique when present
    pub email: Option<Email>,
    /// Unique when present
    pub phone_number: Option<PhoneNumber>,
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Identifier used in logs: email if present, else phone number
    pub fn contact(&self) -> &str {
        match (&self.email, &self.phone_number) {
            (Some(email), _) => email.as_str(),
            (None, Some(phone)) => phone.as_str(),
            (None, None) => "",
        }
    }
}

/// User about to be inserted (no id yet)
///
/// Not enforced here: the registration flow checks that email or phone is present.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Option<Email>,
    pub phone_number: Option<PhoneNumber>,
    pub password_hash: UserPassword,
    pub role: UserRole,
}

impl NewUser {
    /// Attach the store-assigned id
    pub fn into_user(self, user_id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            password_hash: self.password_hash,
            role: self.role,
            created_at,
        }
    }
}
