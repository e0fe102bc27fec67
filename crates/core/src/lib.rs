//! `ledgerstat-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod role;

pub use error::{DomainError, DomainResult};
pub use id::{TermId, UserId};
pub use role::ViewerRole;
