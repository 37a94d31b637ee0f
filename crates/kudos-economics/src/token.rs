// crates/kudos-economics/src/token.rs
//
// KDS (Kudos) token type and supply constants.
//
// Coins are indivisible: a claim always mints a whole number of KDS, and all
// accounting is done in integer coins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Maximum number of KDS that may ever be committed across the ledger.
pub const TOTAL_CIRCULATION: u64 = 100_000;

/// Number of likes that back one KDS.
pub const LIKES_PER_COIN: u64 = 10;

/// A KDS token amount in whole coins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Kds {
    pub coins: u64,
}

impl Kds {
    /// Create an amount from a whole number of coins.
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }

    /// Returns zero KDS.
    pub fn zero() -> Self {
        Self { coins: 0 }
    }

    /// Whether adding `requested` coins keeps this amount at or below `cap`.
    pub fn can_mint(&self, requested: u64, cap: u64) -> bool {
        self.coins
            .checked_add(requested)
            .map(|total| total <= cap)
            .unwrap_or(false)
    }
}

impl Add<u64> for Kds {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self {
            coins: self.coins.saturating_add(rhs),
        }
    }
}

impl fmt::Display for Kds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} KDS", self.coins)
    }
}
