use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

/// amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub interest_rate: Rate,
    pub tenure: u32,
    pub start_date: NaiveDate,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate an equal-installment schedule, one entry per month
    pub fn generate(
        principal: Money,
        interest_rate: Rate,
        tenure: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let emi = AmortizationCalculator::compute_payment(principal, interest_rate, tenure)?;
        let monthly_rate = interest_rate.monthly_rate().as_decimal();

        // fail on an unrepresentable final date before building any rows
        add_months(start_date, tenure)?;

        let mut payments = Vec::new();
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;

        for i in 1..=tenure {
            let payment_date = add_months(start_date, i)?;
            let interest_portion = balance * monthly_rate;
            let mut payment_amount = emi;
            let mut principal_portion = emi - interest_portion;
            let mut ending_balance = balance - principal_portion;

            // final period settles whatever precision residue is left
            if i == tenure {
                principal_portion += ending_balance;
                payment_amount += ending_balance;
                ending_balance = Money::ZERO;
            }

            cumulative_interest += interest_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
            });

            balance = ending_balance;
        }

        let total_payment = payments.iter().map(|p| p.payment_amount).sum();

        Ok(Self {
            principal,
            interest_rate,
            tenure,
            start_date,
            payments,
            total_interest: cumulative_interest,
            total_payment,
        })
    }

    /// get payment for specific period (1-based)
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx as usize))
    }

    /// remaining balance after a given number of payments
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }
}

/// periodic payment calculator
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    /// periodic payment for a fully amortizing loan
    ///
    /// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate.
    /// A zero rate falls back to straight-line P / n. No rounding is applied.
    pub fn compute_payment(principal: Money, annual_rate: Rate, tenure: u32) -> Result<Money> {
        if !principal.is_positive() {
            return Err(LendingError::InvalidLoanAmount { amount: principal });
        }
        if tenure == 0 {
            return Err(LendingError::InvalidTenure { tenure });
        }
        if annual_rate.is_negative() {
            return Err(LendingError::InvalidInterestRate { rate: annual_rate });
        }

        let r = annual_rate.monthly_rate().as_decimal();
        let p = principal.as_decimal();

        if r.is_zero() {
            return Ok(Money::from_decimal(p / Decimal::from(tenure)));
        }

        let base = Decimal::ONE + r;
        let mut compound = Decimal::ONE;
        for _ in 0..tenure {
            compound = compound
                .checked_mul(base)
                .ok_or_else(|| LendingError::overflow("compound factor"))?;
        }

        let numerator = p
            .checked_mul(r)
            .and_then(|v| v.checked_mul(compound))
            .ok_or_else(|| LendingError::overflow("installment numerator"))?;
        let denominator = compound - Decimal::ONE;

        numerator
            .checked_div(denominator)
            .map(Money::from_decimal)
            .ok_or_else(|| LendingError::overflow("installment"))
    }
}

/// calculate EMI amount
pub fn calculate_emi(principal: Money, annual_rate: Rate, tenure: u32) -> Result<Money> {
    AmortizationCalculator::compute_payment(principal, annual_rate, tenure)
}
