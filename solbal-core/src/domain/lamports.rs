//! Native token amounts

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LAMPORTS_PER_SOL;

/// An amount in lamports, the smallest denomination of SOL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lamports(pub u64);

impl Lamports {
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Exact value in whole SOL, with trailing zeros trimmed
    pub fn to_sol(self) -> Decimal {
        // u64 always fits the 96-bit mantissa, so the quotient is exact
        (Decimal::from(self.0) / Decimal::from(LAMPORTS_PER_SOL)).normalize()
    }
}

impl From<u64> for Lamports {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lamports", self.0)
    }
}
