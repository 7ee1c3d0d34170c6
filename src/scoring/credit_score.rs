use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::scoring::history::HistorySummary;
use crate::types::{Customer, Loan};

pub const LIMIT_EXCEEDED_NOTE: &str = "current loans exceed approved limit";

/// points contributed by each signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreBreakdown {
    pub repayment_history: u8,
    pub loan_count: u8,
    pub recent_activity: u8,
    pub utilization: u8,
}

impl ScoreBreakdown {
    /// summed points, capped at 100
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.repayment_history)
            + u16::from(self.loan_count)
            + u16::from(self.recent_activity)
            + u16::from(self.utilization);
        sum.min(100) as u8
    }
}

/// score plus the facts it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAssessment {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub history: HistorySummary,
    pub approved_limit: Money,
    /// summed principals above the approved limit; score forced to 0
    pub limit_exceeded: bool,
    pub meets_approval_threshold: bool,
    pub note: Option<String>,
}

/// computes the 0-100 historical-behavior score
#[derive(Debug, Clone)]
pub struct CreditScoringEngine {
    config: ScoringConfig,
}

impl CreditScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// score a customer's persisted loans as of the given date
    pub fn score(
        &self,
        customer: &Customer,
        loans: &[Loan],
        as_of: NaiveDate,
    ) -> Result<CreditAssessment> {
        let history = HistorySummary::from_loans(loans, as_of.year())?;
        Ok(self.score_history(customer, history))
    }

    pub fn score_history(&self, customer: &Customer, history: HistorySummary) -> CreditAssessment {
        if history.total_principal > customer.approved_limit {
            tracing::debug!(
                customer_id = customer.customer_id,
                total_principal = %history.total_principal,
                approved_limit = %customer.approved_limit,
                "loan volume exceeds approved limit, score forced to zero"
            );
            return CreditAssessment {
                score: 0,
                breakdown: ScoreBreakdown::default(),
                history,
                approved_limit: customer.approved_limit,
                limit_exceeded: true,
                meets_approval_threshold: false,
                note: Some(LIMIT_EXCEEDED_NOTE.to_string()),
            };
        }

        let cfg = &self.config;
        let utilization_cap = customer.approved_limit.fraction(cfg.utilization_threshold);

        let breakdown = ScoreBreakdown {
            repayment_history: if history.all_repaid_on_time() {
                cfg.full_repayment_points
            } else {
                0
            },
            loan_count: if history.loan_count <= cfg.loan_count_threshold {
                cfg.low_loan_count_points
            } else {
                cfg.high_loan_count_points
            },
            recent_activity: if history.loans_this_year > 0 {
                cfg.recent_activity_points
            } else {
                0
            },
            utilization: if history.total_principal <= utilization_cap {
                cfg.low_utilization_points
            } else {
                cfg.high_utilization_points
            },
        };

        let score = breakdown.total();

        tracing::debug!(
            customer_id = customer.customer_id,
            score,
            loan_count = history.loan_count,
            loans_this_year = history.loans_this_year,
            "credit score computed"
        );

        CreditAssessment {
            score,
            breakdown,
            history,
            approved_limit: customer.approved_limit,
            limit_exceeded: false,
            meets_approval_threshold: score >= cfg.approval_threshold,
            note: None,
        }
    }
}

impl Default for CreditScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
