//! Minting phase - one-way Active → Finished latch

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Minting lifecycle phase.
///
/// Starts `Active`; transitions exactly once to `Finished` and never
/// back. While `Active`, only the owner may mint and no tokens move
/// between holders. Once `Finished`, minting is closed forever and
/// transfers become legal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MintingPhase {
    /// Minting window is open; transfers are frozen
    Active,

    /// Allocation is final; transfers are legal, minting is closed
    Finished,
}

impl MintingPhase {
    /// True while the minting window is open
    pub fn is_active(&self) -> bool {
        matches!(self, MintingPhase::Active)
    }

    /// Short code for error messages
    pub fn code(&self) -> &'static str {
        match self {
            MintingPhase::Active => "ACTIVE",
            MintingPhase::Finished => "FINISHED",
        }
    }
}

impl Default for MintingPhase {
    fn default() -> Self {
        MintingPhase::Active
    }
}
