//! Principal - Opaque externally-authenticated caller identity
//!
//! The ledger never creates or verifies identities. A `Principal`
//! arrives already authenticated by the execution environment and is
//! only used as a mapping key and for equality checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing a principal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Principal identifier cannot be empty")]
    Empty,

    #[error("Principal identifier too long (max {max} chars): {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Maximum identifier length accepted at the boundary
const MAX_PRINCIPAL_LEN: usize = 128;

/// An opaque caller identity issued and verified outside the ledger.
///
/// Blank identifiers are rejected at construction so that an
/// unclaimable pending-owner state cannot be created by passing a
/// null-like identifier.
///
/// # Example
/// ```
/// use mintgate_core::Principal;
///
/// let alice: Principal = "alice".parse().unwrap();
/// assert_eq!(alice.as_str(), "alice");
///
/// let blank: Result<Principal, _> = "   ".parse();
/// assert!(blank.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Create a new principal, rejecting blank or oversized identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, PrincipalError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PrincipalError::Empty);
        }
        if id.len() > MAX_PRINCIPAL_LEN {
            return Err(PrincipalError::TooLong {
                max: MAX_PRINCIPAL_LEN,
                actual: id.len(),
            });
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = PrincipalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}
