//! User Password Value Object
//!
//! Domain wrapper over `platform::password`.
//!
//! Argon2id is CPU- and memory-heavy, so the async entry points
//! ([`UserPassword::hash`], [`UserPassword::verify`]) run on tokio's blocking
//! pool instead of the request task.
//!
//! ## Usage
//! ```rust,ignore
//! let raw = RawPassword::new("p".to_string())?;
//! let hashed = UserPassword::hash(raw, None).await?;
//! ```

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;
use std::sync::LazyLock;

use crate::error::{AuthError, AuthResult, ValidationError};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input. Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Any non-empty string is accepted.
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|_| ValidationError::PasswordRequired)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stand-in hash verified when no account matches, built with the same
/// Argon2id parameters as real hashes.
static ABSENT_ACCOUNT_HASH: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    let raw = RawPassword::new("absent-account".to_string()).ok()?;
    UserPassword::hash_blocking(&raw, None).ok()
});

/// Argon2id PHC string as stored in `users.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash on the blocking pool
    pub async fn hash(raw: RawPassword, pepper: Option<Vec<u8>>) -> AuthResult<Self> {
        tokio::task::spawn_blocking(move || Self::hash_blocking(&raw, pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
    }

    pub fn hash_blocking(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw.inner().hash(pepper)?;
        Ok(Self(hashed))
    }

    /// Verify on the blocking pool. A malformed stored hash verifies as `false`.
    pub async fn verify(&self, raw: RawPassword, pepper: Option<Vec<u8>>) -> AuthResult<bool> {
        let hashed = self.clone();
        tokio::task::spawn_blocking(move || hashed.verify_blocking(&raw, pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
    }

    pub fn verify_blocking(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Spend one verification's worth of work for an email with no account,
    /// so the response time does not reveal whether the account exists.
    pub async fn verify_absent(raw: RawPassword, pepper: Option<Vec<u8>>) -> AuthResult<()> {
        tokio::task::spawn_blocking(move || {
            if let Some(stand_in) = ABSENT_ACCOUNT_HASH.as_ref() {
                let _ = stand_in.verify_blocking(&raw, pepper.as_deref());
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
    }

    /// Wrap a hash loaded from the database without re-validating it
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    pub fn is_well_formed(&self) -> bool {
        self.0.is_well_formed()
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
