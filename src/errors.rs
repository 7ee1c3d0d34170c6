use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::{CustomerId, LoanId};

#[derive(Error, Debug)]
pub enum LendingError {
    #[error("customer not found: {customer_id}")]
    CustomerNotFound {
        customer_id: CustomerId,
    },

    #[error("loan not found: {loan_id}")]
    LoanNotFound {
        loan_id: LoanId,
    },

    #[error("invalid loan amount: {amount}")]
    InvalidLoanAmount {
        amount: Money,
    },

    #[error("invalid tenure: {tenure} periods")]
    InvalidTenure {
        tenure: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid monthly income: {income}")]
    InvalidIncome {
        income: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("repository error: {message}")]
    Repository {
        message: String,
    },
}

/// coarse error class a request layer maps onto its own status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvalidInput,
    Internal,
}

impl LendingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LendingError::CustomerNotFound { .. } | LendingError::LoanNotFound { .. } => {
                ErrorCategory::NotFound
            }
            LendingError::InvalidLoanAmount { .. }
            | LendingError::InvalidTenure { .. }
            | LendingError::InvalidInterestRate { .. }
            | LendingError::InvalidIncome { .. }
            | LendingError::InvalidDate { .. } => ErrorCategory::InvalidInput,
            LendingError::CalculationError { .. }
            | LendingError::InvalidConfiguration { .. }
            | LendingError::Repository { .. } => ErrorCategory::Internal,
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        LendingError::CalculationError {
            message: format!("decimal overflow while computing {}", context),
        }
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
