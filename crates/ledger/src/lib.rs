//! Mintgate Ledger - Phase-gated token accounting core
//!
//! This is the HEART of Mintgate. All token state changes go through
//! this crate, one strictly-serialized operation at a time.
//!
//! # Key Types
//! - `TokenLedger`: The single owned aggregate (balances, allowances,
//!   supply, minting phase, ownership, native-value holding)
//! - `MintingPhase`: One-way Active → Finished latch gating which
//!   operations are legal
//! - `Ownership`: Two-step transfer/claim administrative control
//! - `AuditRecord`: Append-only output records emitted by operations
//! - `TokenError`: The full failure taxonomy; every error aborts the
//!   operation with zero state change and zero records

pub mod engine;
pub mod error;
pub mod ownership;
pub mod phase;
pub mod policy;
pub mod record;

pub use engine::TokenLedger;
pub use error::TokenError;
pub use ownership::Ownership;
pub use phase::MintingPhase;
pub use record::AuditRecord;
