//! Ledger errors
//!
//! Every variant aborts the whole operation: no partial state
//! mutation, no audit records. Errors are surfaced to the caller as
//! the operation's outcome and never recovered internally.

use mintgate_core::{Amount, Principal, PrincipalError};
use thiserror::Error;

/// Errors that can occur in token ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Caller {caller} lacks required role: {required}")]
    Unauthorized {
        caller: Principal,
        required: &'static str,
    },

    #[error("Operation {operation} is illegal while minting is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("Insufficient balance for {account}: has {balance}, requested {requested}")]
    InsufficientBalance {
        account: Principal,
        balance: Amount,
        requested: Amount,
    },

    #[error("Insufficient allowance from {owner} to {spender}: has {allowance}, requested {requested}")]
    InsufficientAllowance {
        owner: Principal,
        spender: Principal,
        allowance: Amount,
        requested: Amount,
    },

    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    #[error("Arithmetic underflow in {operation}")]
    ArithmeticUnderflow { operation: &'static str },

    #[error("Native value deposits are not accepted")]
    ValueRejected,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<PrincipalError> for TokenError {
    fn from(err: PrincipalError) -> Self {
        TokenError::InvalidArgument(err.to_string())
    }
}
