//! response records handed to a request layer; amounts are rounded here and nowhere else
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::eligibility::EligibilityOutcome;
use crate::types::{Customer, CustomerId, Loan, LoanId};

const DISPLAY_DP: u32 = 2;

fn display(amount: Money) -> Decimal {
    amount.round_dp(DISPLAY_DP).as_decimal()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub customer_id: CustomerId,
    pub name: String,
    pub age: u32,
    pub monthly_income: Decimal,
    pub approved_limit: Decimal,
    pub phone_number: String,
}

impl CustomerView {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: customer.full_name(),
            age: customer.age,
            monthly_income: display(customer.monthly_income),
            approved_limit: display(customer.approved_limit),
            phone_number: customer.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub customer_id: CustomerId,
    pub approval: bool,
    pub reason: String,
    /// annual percent actually used for the installment
    pub interest_rate: Decimal,
    pub corrected_interest_rate: Option<Decimal>,
    pub credit_score: Option<u8>,
    pub tenure: u32,
    pub monthly_installment: Decimal,
}

impl EligibilityResponse {
    pub fn from_outcome(customer_id: CustomerId, outcome: &EligibilityOutcome) -> Self {
        Self {
            customer_id,
            approval: outcome.decision.eligible,
            reason: outcome.decision.reason.summary().to_string(),
            interest_rate: outcome.applied_rate.as_percentage(),
            corrected_interest_rate: outcome
                .decision
                .corrected_minimum_rate
                .map(|r| r.as_percentage()),
            credit_score: outcome.decision.assessment.as_ref().map(|a| a.score),
            tenure: outcome.requested.tenure,
            monthly_installment: display(outcome.periodic_payment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLoanResponse {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub loan_approved: bool,
    pub message: String,
    pub monthly_installment: Decimal,
}

impl CreateLoanResponse {
    pub fn approved(loan: &Loan) -> Self {
        Self {
            loan_id: Some(loan.loan_id),
            customer_id: loan.customer_id,
            loan_approved: true,
            message: "loan approved".to_string(),
            monthly_installment: display(loan.monthly_repayment),
        }
    }

    pub fn declined(customer_id: CustomerId, outcome: &EligibilityOutcome) -> Self {
        Self {
            loan_id: None,
            customer_id,
            loan_approved: false,
            message: outcome.decision.reason.summary().to_string(),
            monthly_installment: display(outcome.periodic_payment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailView {
    pub loan_id: LoanId,
    pub customer: CustomerSummary,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_installment: Decimal,
    pub tenure: u32,
}

impl LoanDetailView {
    pub fn from_loan(loan: &Loan, customer: &Customer) -> Self {
        Self {
            loan_id: loan.loan_id,
            customer: CustomerSummary {
                id: customer.customer_id,
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                phone_number: customer.phone_number.clone(),
                age: customer.age,
            },
            loan_amount: display(loan.loan_amount),
            interest_rate: loan.interest_rate.as_percentage(),
            monthly_installment: display(loan.monthly_repayment),
            tenure: loan.tenure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub loan_id: LoanId,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_installment: Decimal,
    pub repayments_left: u32,
}

impl LoanSummaryView {
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id,
            loan_amount: display(loan.loan_amount),
            interest_rate: loan.interest_rate.as_percentage(),
            monthly_installment: display(loan.monthly_repayment),
            repayments_left: loan.repayments_left(),
        }
    }
}

/// pretty json for any response record
pub fn to_json_pretty<T: Serialize>(view: &T) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|e| format!("JSON error: {}", e))
}
