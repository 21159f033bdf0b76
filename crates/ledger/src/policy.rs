//! Capability predicates invoked at the top of each operation
//!
//! Authorization is expressed as explicit, composable checks rather
//! than role hierarchies. Each predicate either passes or returns the
//! error that aborts the operation.

use crate::error::TokenError;
use crate::ownership::Ownership;
use crate::phase::MintingPhase;
use mintgate_core::Principal;

/// Caller must be the current owner
pub fn require_owner(ownership: &Ownership, caller: &Principal) -> Result<(), TokenError> {
    if caller == ownership.owner() {
        Ok(())
    } else {
        Err(TokenError::Unauthorized {
            caller: caller.clone(),
            required: "owner",
        })
    }
}

/// Minting must still be open
pub fn require_active(phase: MintingPhase, operation: &'static str) -> Result<(), TokenError> {
    if phase.is_active() {
        Ok(())
    } else {
        Err(TokenError::InvalidState {
            operation,
            phase: phase.code(),
        })
    }
}

/// Minting must be finished (transfers are frozen during the window)
pub fn require_finished(phase: MintingPhase, operation: &'static str) -> Result<(), TokenError> {
    if phase.is_active() {
        Err(TokenError::InvalidState {
            operation,
            phase: phase.code(),
        })
    } else {
        Ok(())
    }
}
