//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use crate::domain::entity::{
    profile::RoleProfile,
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, phone_number::PhoneNumber, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and its role extension atomically.
    ///
    /// Fails with `AuthError::UserAlreadyExists` if the email or phone number
    /// is already taken; nothing is written in that case.
    async fn create(&self, user: &NewUser, profile: &RoleProfile) -> AuthResult<User>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Whether any user has the given email OR the given phone number
    async fn exists_by_contact(
        &self,
        email: Option<&Email>,
        phone_number: Option<&PhoneNumber>,
    ) -> AuthResult<bool>;

    /// Role extension record of a user
    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<RoleProfile>>;
}
