use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::add_months;
use crate::config::PolicyConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};
use crate::payments::{AmortizationCalculator, AmortizationSchedule};

/// customer identifier assigned by the repository
pub type CustomerId = u64;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// customer snapshot with affordability facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub monthly_income: Money,
    /// set once at onboarding, never mutated by the engine
    pub approved_limit: Money,
}

/// onboarding request for a new customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub monthly_income: Money,
    pub phone_number: String,
}

impl Customer {
    /// onboard a customer, deriving the approved limit from income
    pub fn onboard(
        customer_id: CustomerId,
        registration: CustomerRegistration,
        policy: &PolicyConfig,
    ) -> Result<Self> {
        if !registration.monthly_income.is_positive() {
            return Err(LendingError::InvalidIncome {
                income: registration.monthly_income,
            });
        }

        let approved_limit = registration
            .monthly_income
            .checked_mul(policy.approved_limit_multiplier)
            .ok_or_else(|| LendingError::overflow("approved limit"))?;

        Ok(Self {
            customer_id,
            first_name: registration.first_name,
            last_name: registration.last_name,
            age: registration.age,
            phone_number: registration.phone_number,
            monthly_income: registration.monthly_income,
            approved_limit,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// a single credit obligation as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    /// number of monthly periods
    pub tenure: u32,
    pub interest_rate: Rate,
    /// fixed at creation
    pub monthly_repayment: Money,
    /// advanced externally as installments are paid
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Loan {
    /// originate a loan on approved terms starting at `start_date`
    pub fn originate(
        customer_id: CustomerId,
        terms: &LoanRequest,
        interest_rate: Rate,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let monthly_repayment =
            AmortizationCalculator::compute_payment(terms.amount, interest_rate, terms.tenure)?;
        let end_date = add_months(start_date, terms.tenure)?;

        Ok(Self {
            loan_id: Uuid::new_v4(),
            customer_id,
            loan_amount: terms.amount,
            tenure: terms.tenure,
            interest_rate,
            monthly_repayment,
            emis_paid_on_time: 0,
            start_date,
            end_date,
        })
    }

    pub fn is_fully_repaid_on_time(&self) -> bool {
        self.emis_paid_on_time == self.tenure
    }

    pub fn repayments_left(&self) -> u32 {
        self.tenure.saturating_sub(self.emis_paid_on_time)
    }

    pub fn started_in_year(&self, year: i32) -> bool {
        self.start_date.year() == year
    }

    /// full repayment schedule for this loan's terms
    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(
            self.loan_amount,
            self.interest_rate,
            self.tenure,
            self.start_date,
        )
    }
}

/// requested loan terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub amount: Money,
    pub interest_rate: Rate,
    pub tenure: u32,
}

impl LoanRequest {
    pub fn new(amount: Money, interest_rate: Rate, tenure: u32) -> Self {
        Self {
            amount,
            interest_rate,
            tenure,
        }
    }

    /// reject terms the amortization formula is undefined for
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(LendingError::InvalidLoanAmount { amount: self.amount });
        }
        if self.tenure == 0 {
            return Err(LendingError::InvalidTenure { tenure: self.tenure });
        }
        if self.interest_rate.is_negative() {
            return Err(LendingError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }
        Ok(())
    }

    /// same terms at a different rate
    pub fn with_rate(&self, interest_rate: Rate) -> Self {
        Self {
            interest_rate,
            ..*self
        }
    }
}
