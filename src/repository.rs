use std::collections::BTreeMap;

use crate::errors::{LendingError, Result};
use crate::types::{Customer, CustomerId, Loan, LoanId};

/// storage seam supplying customer and loan snapshots to the engine
pub trait LoanRepository {
    fn customer(&self, customer_id: CustomerId) -> Result<Option<Customer>>;

    /// every loan owned by the customer, materialized once per decision
    fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>>;

    fn loan(&self, loan_id: LoanId) -> Result<Option<Loan>>;

    fn next_customer_id(&self) -> Result<CustomerId>;

    fn insert_customer(&mut self, customer: Customer) -> Result<()>;

    fn insert_loan(&mut self, loan: Loan) -> Result<()>;
}

/// map-backed repository for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    customers: BTreeMap<CustomerId, Customer>,
    loans: BTreeMap<LoanId, Loan>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed an existing loan, e.g. imported history
    pub fn with_loan(mut self, loan: Loan) -> Self {
        self.loans.insert(loan.loan_id, loan);
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customers.insert(customer.customer_id, customer);
        self
    }

    /// record on-time installments the way a payment collaborator would
    pub fn record_on_time_payments(&mut self, loan_id: LoanId, count: u32) -> Result<()> {
        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(LendingError::LoanNotFound { loan_id })?;
        loan.emis_paid_on_time = loan.emis_paid_on_time.saturating_add(count).min(loan.tenure);
        Ok(())
    }
}

impl LoanRepository for InMemoryRepository {
    fn customer(&self, customer_id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.get(&customer_id).cloned())
    }

    fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>> {
        let mut loans: Vec<Loan> = self
            .loans
            .values()
            .filter(|l| l.customer_id == customer_id)
            .cloned()
            .collect();
        loans.sort_by_key(|l| (l.start_date, l.loan_id));
        Ok(loans)
    }

    fn loan(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        Ok(self.loans.get(&loan_id).cloned())
    }

    fn next_customer_id(&self) -> Result<CustomerId> {
        Ok(self
            .customers
            .keys()
            .next_back()
            .map(|id| id + 1)
            .unwrap_or(1))
    }

    fn insert_customer(&mut self, customer: Customer) -> Result<()> {
        if self.customers.contains_key(&customer.customer_id) {
            return Err(LendingError::Repository {
                message: format!("customer {} already exists", customer.customer_id),
            });
        }
        if self
            .customers
            .values()
            .any(|c| c.phone_number == customer.phone_number)
        {
            return Err(LendingError::Repository {
                message: format!("phone number {} already registered", customer.phone_number),
            });
        }
        self.customers.insert(customer.customer_id, customer);
        Ok(())
    }

    fn insert_loan(&mut self, loan: Loan) -> Result<()> {
        if !self.customers.contains_key(&loan.customer_id) {
            return Err(LendingError::CustomerNotFound {
                customer_id: loan.customer_id,
            });
        }
        if self.loans.contains_key(&loan.loan_id) {
            return Err(LendingError::Repository {
                message: format!("loan {} already exists", loan.loan_id),
            });
        }
        self.loans.insert(loan.loan_id, loan);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::LoanRequest;
    use chrono::NaiveDate;

    fn customer(id: CustomerId, phone: &str) -> Customer {
        Customer {
            customer_id: id,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            age: 30,
            phone_number: phone.to_string(),
            monthly_income: Money::from_major(50_000),
            approved_limit: Money::from_major(1_800_000),
        }
    }

    fn loan_for(customer_id: CustomerId) -> Loan {
        let request = LoanRequest::new(Money::from_major(60_000), Rate::from_percentage(12), 6);
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        Loan::originate(customer_id, &request, request.interest_rate, start).unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut repo = InMemoryRepository::new();
        assert_eq!(repo.next_customer_id().unwrap(), 1);
        repo.insert_customer(customer(1, "111")).unwrap();
        repo.insert_customer(customer(5, "555")).unwrap();
        assert_eq!(repo.next_customer_id().unwrap(), 6);
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let mut repo = InMemoryRepository::new();
        repo.insert_customer(customer(1, "111")).unwrap();
        assert!(matches!(
            repo.insert_customer(customer(2, "111")),
            Err(LendingError::Repository { .. })
        ));
    }

    #[test]
    fn test_loans_are_scoped_to_customer() {
        let mut repo = InMemoryRepository::new()
            .with_customer(customer(1, "111"))
            .with_customer(customer(2, "222"));
        repo.insert_loan(loan_for(1)).unwrap();
        repo.insert_loan(loan_for(1)).unwrap();
        repo.insert_loan(loan_for(2)).unwrap();

        assert_eq!(repo.loans_for_customer(1).unwrap().len(), 2);
        assert_eq!(repo.loans_for_customer(2).unwrap().len(), 1);
        assert!(repo.loans_for_customer(3).unwrap().is_empty());
    }

    #[test]
    fn test_loan_requires_known_customer() {
        let mut repo = InMemoryRepository::new();
        assert!(matches!(
            repo.insert_loan(loan_for(9)),
            Err(LendingError::CustomerNotFound { customer_id: 9 })
        ));
    }

    #[test]
    fn test_payment_recording_caps_at_tenure() {
        let loan = loan_for(1);
        let loan_id = loan.loan_id;
        let mut repo = InMemoryRepository::new()
            .with_customer(customer(1, "111"))
            .with_loan(loan);

        repo.record_on_time_payments(loan_id, 4).unwrap();
        repo.record_on_time_payments(loan_id, 4).unwrap();
        let stored = repo.loan(loan_id).unwrap().unwrap();
        assert_eq!(stored.emis_paid_on_time, 6);
        assert!(stored.is_fully_repaid_on_time());
    }
}
