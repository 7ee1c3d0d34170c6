pub mod decision;
pub mod tiers;

pub use decision::{DecisionReason, EligibilityDecision, EligibilityEngine, EligibilityOutcome};
pub use tiers::{rate_floor, RateFloor};
