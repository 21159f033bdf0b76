//! Audit records - append-only operation output
//!
//! Every successful mutation returns the records it produced, in
//! emission order, for an external indexer to consume. A failed
//! operation produces none.

use mintgate_core::{Amount, Principal};
use serde::{Deserialize, Serialize};

/// Externally observable notification of a state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditRecord {
    /// New supply was created for `to`
    Minted { to: Principal, amount: Amount },

    /// Value moved between holders. `from` is `None` for the
    /// mint-companion record (value entered circulation from nowhere).
    Transferred {
        from: Option<Principal>,
        to: Principal,
        amount: Amount,
    },

    /// `owner` granted `spender` a delegated spending limit
    Approved {
        owner: Principal,
        spender: Principal,
        amount: Amount,
    },

    /// The minting window closed; emitted exactly once per ledger
    MintingFinished,

    /// A pending ownership nomination was claimed
    OwnershipTransferred {
        previous: Principal,
        new: Principal,
    },
}

impl AuditRecord {
    /// Create a Minted record
    pub fn minted(to: Principal, amount: Amount) -> Self {
        Self::Minted { to, amount }
    }

    /// Create a Transferred record between two holders
    pub fn transferred(from: Principal, to: Principal, amount: Amount) -> Self {
        Self::Transferred {
            from: Some(from),
            to,
            amount,
        }
    }

    /// Create the mint-companion Transferred record (no source holder)
    pub fn transferred_from_none(to: Principal, amount: Amount) -> Self {
        Self::Transferred {
            from: None,
            to,
            amount,
        }
    }

    /// Create an Approved record
    pub fn approved(owner: Principal, spender: Principal, amount: Amount) -> Self {
        Self::Approved {
            owner,
            spender,
            amount,
        }
    }
}
