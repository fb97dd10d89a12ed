//! Entity Module

pub mod profile;
pub mod session_claims;
pub mod user;
