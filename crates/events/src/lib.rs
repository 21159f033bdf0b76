//! Mintgate Events - Hash-chained JSONL audit log
//!
//! Successful ledger operations emit `AuditRecord`s; this crate seals
//! them into a tamper-evident envelope (sequence, prev_hash, SHA-256
//! hash) and persists them as append-only JSONL for external indexers.

pub mod error;
pub mod reader;
pub mod seal;
pub mod store;

pub use error::AuditLogError;
pub use reader::AuditLogReader;
pub use seal::{calculate_record_hash, verify_chain, SealedRecord};
pub use store::AuditLog;
