//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Secure random bytes
//! - Password hashing (Argon2id)
//! - Signed, expiring bearer tokens (HS256 JWT)
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
