use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::config::PolicyConfig;
use crate::decimal::{Money, Rate};
use crate::eligibility::tiers::{rate_floor, RateFloor};
use crate::errors::{LendingError, Result};
use crate::payments::AmortizationCalculator;
use crate::scoring::{CreditAssessment, CreditScoringEngine};
use crate::types::{Customer, Loan, LoanRequest};

/// why a request was approved or denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionReason {
    AffordabilityExceeded,
    NewCustomerWithinLimit,
    CreditScoreTooLow,
    RateBelowTierMinimum,
    EligibleByScore,
}

impl DecisionReason {
    pub fn summary(&self) -> &'static str {
        match self {
            DecisionReason::AffordabilityExceeded => "total installments exceed affordability ceiling",
            DecisionReason::NewCustomerWithinLimit => "no previous loans, within approved limit",
            DecisionReason::CreditScoreTooLow => "credit score too low",
            DecisionReason::RateBelowTierMinimum => {
                "requested rate below the required minimum for this score tier"
            }
            DecisionReason::EligibleByScore => "eligible as per credit score and interest rate",
        }
    }
}

/// approve/deny outcome of the policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    pub reason: DecisionReason,
    /// only set when the requested rate was below the score tier's floor
    pub corrected_minimum_rate: Option<Rate>,
    /// existing installments plus the requested loan's installment
    pub total_monthly_burden: Money,
    pub affordability_ceiling: Money,
    /// present when the score was consulted
    pub assessment: Option<CreditAssessment>,
}

/// decision plus the finalized terms a caller persists or reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub decision: EligibilityDecision,
    pub requested: LoanRequest,
    /// corrected minimum when one was reported, requested rate otherwise
    pub applied_rate: Rate,
    pub periodic_payment: Money,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EligibilityOutcome {
    pub fn is_eligible(&self) -> bool {
        self.decision.eligible
    }
}

/// composes the amortization calculator and scoring engine into one decision
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    policy: PolicyConfig,
    scorer: CreditScoringEngine,
}

impl EligibilityEngine {
    pub fn new(policy: PolicyConfig) -> Result<Self> {
        policy.validate()?;
        let scorer = CreditScoringEngine::new(policy.scoring.clone());
        Ok(Self { policy, scorer })
    }

    pub fn standard() -> Self {
        let policy = PolicyConfig::standard();
        Self {
            scorer: CreditScoringEngine::new(policy.scoring.clone()),
            policy,
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// decide a request against the customer's persisted loans
    ///
    /// Order: affordability ceiling, new-customer fast path, score tier, rate floor.
    pub fn decide(
        &self,
        customer: &Customer,
        loans: &[Loan],
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> Result<EligibilityDecision> {
        request.validate()?;

        let existing = loans.iter().try_fold(Money::ZERO, |acc, l| {
            acc.checked_add(l.monthly_repayment)
                .ok_or_else(|| LendingError::overflow("existing installments"))
        })?;
        let requested = AmortizationCalculator::compute_payment(
            request.amount,
            request.interest_rate,
            request.tenure,
        )?;
        let total_monthly_burden = existing
            .checked_add(requested)
            .ok_or_else(|| LendingError::overflow("monthly burden"))?;
        let affordability_ceiling = customer
            .monthly_income
            .fraction(self.policy.affordability.max_installment_to_income);

        tracing::debug!(
            customer_id = customer.customer_id,
            burden = %total_monthly_burden,
            ceiling = %affordability_ceiling,
            "affordability check"
        );

        let decision = |eligible: bool,
                        reason: DecisionReason,
                        corrected_minimum_rate: Option<Rate>,
                        assessment: Option<CreditAssessment>| EligibilityDecision {
            eligible,
            reason,
            corrected_minimum_rate,
            total_monthly_burden,
            affordability_ceiling,
            assessment,
        };

        if total_monthly_burden > affordability_ceiling {
            return Ok(decision(false, DecisionReason::AffordabilityExceeded, None, None));
        }

        if loans.is_empty() && request.amount <= customer.approved_limit {
            return Ok(decision(true, DecisionReason::NewCustomerWithinLimit, None, None));
        }

        let assessment = self.scorer.score(customer, loans, as_of)?;
        let floor = rate_floor(&self.policy.rate_tiers, assessment.score);

        tracing::debug!(
            customer_id = customer.customer_id,
            score = assessment.score,
            floor = ?floor,
            requested_rate = %request.interest_rate,
            "rate tier selected"
        );

        match floor {
            RateFloor::Ineligible => Ok(decision(
                false,
                DecisionReason::CreditScoreTooLow,
                None,
                Some(assessment),
            )),
            RateFloor::Minimum(minimum) if request.interest_rate < minimum => Ok(decision(
                false,
                DecisionReason::RateBelowTierMinimum,
                Some(minimum),
                Some(assessment),
            )),
            RateFloor::Minimum(_) => Ok(decision(
                true,
                DecisionReason::EligibleByScore,
                None,
                Some(assessment),
            )),
        }
    }

    /// decide and finalize the payment and dates an approved loan would carry
    pub fn evaluate(
        &self,
        customer: &Customer,
        loans: &[Loan],
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> Result<EligibilityOutcome> {
        let decision = self.decide(customer, loans, request, as_of)?;

        let applied_rate = decision
            .corrected_minimum_rate
            .unwrap_or(request.interest_rate);
        let periodic_payment =
            AmortizationCalculator::compute_payment(request.amount, applied_rate, request.tenure)?;

        let (start_date, end_date) = if decision.eligible {
            (Some(as_of), Some(add_months(as_of, request.tenure)?))
        } else {
            (None, None)
        };

        tracing::info!(
            customer_id = customer.customer_id,
            eligible = decision.eligible,
            reason = decision.reason.summary(),
            applied_rate = %applied_rate,
            "eligibility decided"
        );

        Ok(EligibilityOutcome {
            decision,
            requested: *request,
            applied_rate,
            periodic_payment,
            start_date,
            end_date,
        })
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}
