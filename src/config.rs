use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LendingError, Result};

/// lending policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// approved limit = multiplier x monthly income, fixed at onboarding
    pub approved_limit_multiplier: Decimal,
    pub affordability: AffordabilityConfig,
    pub scoring: ScoringConfig,
    /// ordered from the highest score band down
    pub rate_tiers: Vec<RateTier>,
}

/// affordability ceiling on total monthly installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityConfig {
    /// share of monthly income the installments may reach (inclusive)
    pub max_installment_to_income: Decimal,
}

/// credit score weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub full_repayment_points: u8,
    pub loan_count_threshold: usize,
    pub low_loan_count_points: u8,
    pub high_loan_count_points: u8,
    pub recent_activity_points: u8,
    /// share of approved limit the summed principals may reach (inclusive)
    pub utilization_threshold: Decimal,
    pub low_utilization_points: u8,
    pub high_utilization_points: u8,
    pub approval_threshold: u8,
}

/// score band mapped to a minimum acceptable annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// band applies when score > this value
    pub score_above: u8,
    pub minimum_rate: Rate,
}

impl ScoringConfig {
    /// highest score the weights can produce
    pub fn max_score(&self) -> u32 {
        u32::from(self.full_repayment_points)
            + u32::from(self.low_loan_count_points.max(self.high_loan_count_points))
            + u32::from(self.recent_activity_points)
            + u32::from(self.low_utilization_points.max(self.high_utilization_points))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            full_repayment_points: 40,
            loan_count_threshold: 2,
            low_loan_count_points: 10,
            high_loan_count_points: 5,
            recent_activity_points: 20,
            utilization_threshold: dec!(0.8),
            low_utilization_points: 30,
            high_utilization_points: 10,
            approval_threshold: 50,
        }
    }
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            max_installment_to_income: dec!(0.5),
        }
    }
}

impl PolicyConfig {
    /// the production lending policy
    pub fn standard() -> Self {
        Self {
            approved_limit_multiplier: dec!(36),
            affordability: AffordabilityConfig::default(),
            scoring: ScoringConfig::default(),
            rate_tiers: vec![
                RateTier { score_above: 50, minimum_rate: Rate::ZERO },
                RateTier { score_above: 30, minimum_rate: Rate::from_percentage(12) },
                RateTier { score_above: 10, minimum_rate: Rate::from_percentage(16) },
            ],
        }
    }

    /// parse a policy from json and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PolicyConfig =
            serde_json::from_str(json).map_err(|e| LendingError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.approved_limit_multiplier <= Decimal::ZERO {
            return Err(invalid("approved limit multiplier must be positive"));
        }

        let ceiling = self.affordability.max_installment_to_income;
        if ceiling <= Decimal::ZERO || ceiling > Decimal::ONE {
            return Err(invalid("affordability ceiling must be within (0, 1]"));
        }

        let utilization = self.scoring.utilization_threshold;
        if utilization <= Decimal::ZERO || utilization > Decimal::ONE {
            return Err(invalid("utilization threshold must be within (0, 1]"));
        }

        if self.scoring.max_score() > 100 {
            return Err(invalid("scoring weights exceed a maximum score of 100"));
        }

        if self.rate_tiers.is_empty() {
            return Err(invalid("at least one rate tier is required"));
        }

        for pair in self.rate_tiers.windows(2) {
            if pair[0].score_above <= pair[1].score_above {
                return Err(invalid("rate tiers must be ordered by strictly descending score"));
            }
            if pair[0].minimum_rate > pair[1].minimum_rate {
                return Err(invalid("a higher score band cannot require a higher rate"));
            }
        }

        if self.rate_tiers.iter().any(|t| t.minimum_rate.is_negative()) {
            return Err(invalid("tier minimum rate cannot be negative"));
        }

        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid(message: &str) -> LendingError {
    tracing::warn!(reason = message, "rejected lending policy");
    LendingError::InvalidConfiguration {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_is_valid() {
        let config = PolicyConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.max_score(), 100);
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn test_json_round_trip_preserves_policy() {
        let json = serde_json::to_string(&PolicyConfig::standard()).unwrap();
        let parsed = PolicyConfig::from_json(&json).unwrap();
        assert_eq!(parsed, PolicyConfig::standard());
    }

    #[test]
    fn test_rejects_excessive_weights() {
        let mut config = PolicyConfig::standard();
        config.scoring.recent_activity_points = 25;
        assert!(matches!(
            config.validate(),
            Err(LendingError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let mut config = PolicyConfig::standard();
        config.rate_tiers.swap(0, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_ceiling_out_of_range() {
        let mut config = PolicyConfig::standard();
        config.affordability.max_installment_to_income = dec!(1.5);
        assert!(config.validate().is_err());

        config.affordability.max_installment_to_income = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = PolicyConfig::from_json("{\"approved_limit_multiplier\": ").unwrap_err();
        assert!(matches!(err, LendingError::InvalidConfiguration { .. }));
    }
}
