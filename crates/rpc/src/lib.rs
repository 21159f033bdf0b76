//! Mintgate RPC - CLI orchestrator
//!
//! Wires the token ledger aggregate and the audit log behind a single
//! writer. Callers are explicit principals; the environment that
//! authenticated them is out of scope.

pub mod commands;
pub mod context;

pub use context::{AppContext, ContextError};
