//! Mintgate Core - Domain types
//!
//! This crate contains the fundamental types used across Mintgate:
//! - `Amount`: Overflow-checked non-negative token amount (base units)
//! - `Principal`: Opaque, externally-authenticated caller identity
//! - `TokenMetadata`: Name/symbol/decimals, fixed at construction

pub mod amount;
pub mod metadata;
pub mod principal;

pub use amount::Amount;
pub use metadata::TokenMetadata;
pub use principal::{Principal, PrincipalError};
