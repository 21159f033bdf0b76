//! Ownership registry - two-step administrative transfer
//!
//! The current owner nominates a successor; the nomination takes
//! effect only when the successor actively claims it. A mistyped or
//! unreachable candidate therefore never costs administrative control:
//! the old owner stays in charge until the claim succeeds.

use crate::error::TokenError;
use mintgate_core::Principal;
use serde::{Deserialize, Serialize};

/// Current administrative principal plus an optional pending successor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owner: Principal,
    pending: Option<Principal>,
}

impl Ownership {
    /// Create with the deploying principal as owner and no pending successor
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            pending: None,
        }
    }

    /// The current owner
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// The pending successor, if a transfer was initiated
    pub fn pending(&self) -> Option<&Principal> {
        self.pending.as_ref()
    }

    /// Nominate a successor. Owner-only; does not change the owner.
    pub fn transfer(&mut self, caller: &Principal, candidate: Principal) -> Result<(), TokenError> {
        crate::policy::require_owner(self, caller)?;
        self.pending = Some(candidate);
        Ok(())
    }

    /// Claim a pending nomination. Only the nominated principal may
    /// succeed; everyone else (including when no nomination exists)
    /// fails with `Unauthorized`.
    ///
    /// Returns the previous owner on success.
    pub fn claim(&mut self, caller: &Principal) -> Result<Principal, TokenError> {
        match self.pending.take() {
            Some(pending) if &pending == caller => {
                let previous = std::mem::replace(&mut self.owner, pending);
                Ok(previous)
            }
            other => {
                // Not the nominee (or no nomination): leave state untouched
                self.pending = other;
                Err(TokenError::Unauthorized {
                    caller: caller.clone(),
                    required: "pending owner",
                })
            }
        }
    }
}
