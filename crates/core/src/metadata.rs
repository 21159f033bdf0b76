//! Token metadata - static descriptors fixed at construction

use crate::amount::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest scale `Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// Static token descriptors. Set once at construction, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name
    pub name: String,

    /// Ticker symbol
    pub symbol: String,

    /// Number of decimal places between base units and whole tokens
    pub decimals: u8,
}

impl TokenMetadata {
    /// Create token metadata
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Render a base-unit amount as whole tokens.
    ///
    /// Returns `None` when the amount or the scale exceeds the
    /// representable decimal range (amounts are u128, `Decimal`
    /// mantissas are i128 with at most 28 fractional digits).
    pub fn whole_units(&self, amount: Amount) -> Option<Decimal> {
        if u32::from(self.decimals) > MAX_DECIMAL_SCALE {
            return None;
        }
        let mantissa = i128::try_from(amount.value()).ok()?;
        Some(Decimal::from_i128_with_scale(
            mantissa,
            u32::from(self.decimals),
        ))
    }
}
