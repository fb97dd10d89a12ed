//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed identifiers
//!
//! Only things with the same meaning across every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
