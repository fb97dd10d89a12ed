//! In-Memory Repository Implementation
//!
//! Process-local credential store for tests and local runs without a
//! database. Uniqueness is checked and the insert done under one lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::entity::{
    profile::RoleProfile,
    user::{NewUser, User},
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: HashMap<UserId, RoleProfile>,
}

impl Tables {
    fn contact_taken(&self, email: Option<&Email>, phone_number: Option<&PhoneNumber>) -> bool {
        self.users.iter().any(|u| {
            let email_match = email.is_some() && u.email.as_ref() == email;
            let phone_match = phone_number.is_some() && u.phone_number.as_ref() == phone_number;
            email_match || phone_match
        })
    }
}

/// In-memory credential store
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn user_count(&self) -> AuthResult<usize> {
        Ok(self.lock()?.users.len())
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AuthError::Internal("In-memory store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &NewUser, profile: &RoleProfile) -> AuthResult<User> {
        let mut tables = self.lock()?;

        if tables.contact_taken(user.email.as_ref(), user.phone_number.as_ref()) {
            return Err(AuthError::UserAlreadyExists);
        }

        let created = user.clone().into_user(UserId::new(), Utc::now());
        tables.profiles.insert(created.user_id, profile.clone());
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn exists_by_contact(
        &self,
        email: Option<&Email>,
        phone_number: Option<&PhoneNumber>,
    ) -> AuthResult<bool> {
        Ok(self.lock()?.contact_taken(email, phone_number))
    }

    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<RoleProfile>> {
        Ok(self.lock()?.profiles.get(user_id).cloned())
    }
}
