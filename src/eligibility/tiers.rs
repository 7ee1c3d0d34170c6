use serde::{Deserialize, Serialize};

use crate::config::RateTier;
use crate::decimal::Rate;

/// interest-rate floor selected by a credit score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateFloor {
    Minimum(Rate),
    /// score falls below every band
    Ineligible,
}

/// map a score onto the first band it clears; bands are exclusive below, inclusive above
pub fn rate_floor(tiers: &[RateTier], score: u8) -> RateFloor {
    tiers
        .iter()
        .find(|tier| score > tier.score_above)
        .map(|tier| RateFloor::Minimum(tier.minimum_rate))
        .unwrap_or(RateFloor::Ineligible)
}
