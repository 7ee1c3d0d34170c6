use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::types::Loan;

/// aggregate facts over a customer's loan snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistorySummary {
    pub loan_count: usize,
    pub fully_paid_on_time: usize,
    pub loans_this_year: usize,
    pub total_principal: Money,
    pub total_monthly_repayment: Money,
}

impl HistorySummary {
    /// fold the snapshot once; `current_year` drives the recent-activity count
    pub fn from_loans(loans: &[Loan], current_year: i32) -> Result<Self> {
        loans.iter().try_fold(Self::default(), |mut acc, loan| {
            acc.loan_count += 1;
            if loan.is_fully_repaid_on_time() {
                acc.fully_paid_on_time += 1;
            }
            if loan.started_in_year(current_year) {
                acc.loans_this_year += 1;
            }
            acc.total_principal = acc
                .total_principal
                .checked_add(loan.loan_amount)
                .ok_or_else(|| LendingError::overflow("total principal"))?;
            acc.total_monthly_repayment = acc
                .total_monthly_repayment
                .checked_add(loan.monthly_repayment)
                .ok_or_else(|| LendingError::overflow("total monthly repayment"))?;
            Ok(acc)
        })
    }

    pub fn has_loans(&self) -> bool {
        self.loan_count > 0
    }

    /// at least one loan and every loan paid on time in full
    pub fn all_repaid_on_time(&self) -> bool {
        self.has_loans() && self.fully_paid_on_time == self.loan_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn loan(amount: i64, repayment: i64, tenure: u32, paid: u32, year: i32) -> Loan {
        Loan {
            loan_id: Uuid::new_v4(),
            customer_id: 1,
            loan_amount: Money::from_major(amount),
            tenure,
            interest_rate: Rate::from_percentage(10),
            monthly_repayment: Money::from_major(repayment),
            emis_paid_on_time: paid,
            start_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(year + 1, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = HistorySummary::from_loans(&[], 2024).unwrap();
        assert_eq!(summary, HistorySummary::default());
        assert!(!summary.all_repaid_on_time());
    }

    #[test]
    fn test_aggregates() {
        let loans = vec![
            loan(100_000, 9_000, 12, 12, 2024),
            loan(50_000, 4_500, 12, 7, 2022),
        ];
        let summary = HistorySummary::from_loans(&loans, 2024).unwrap();

        assert_eq!(summary.loan_count, 2);
        assert_eq!(summary.fully_paid_on_time, 1);
        assert_eq!(summary.loans_this_year, 1);
        assert_eq!(summary.total_principal, Money::from_major(150_000));
        assert_eq!(summary.total_monthly_repayment, Money::from_major(13_500));
        assert!(!summary.all_repaid_on_time());
    }

    #[test]
    fn test_principal_overflow_is_an_error() {
        let mut huge = loan(0, 0, 12, 0, 2024);
        huge.loan_amount = Money::from_decimal(Decimal::MAX);
        let loans = vec![huge.clone(), huge];

        let err = HistorySummary::from_loans(&loans, 2024).unwrap_err();
        assert!(matches!(err, LendingError::CalculationError { .. }));
    }
}
