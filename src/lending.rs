use hourglass_rs::SafeTimeProvider;

use crate::config::PolicyConfig;
use crate::eligibility::{EligibilityEngine, EligibilityOutcome};
use crate::errors::{LendingError, Result};
use crate::events::{Event, EventStore};
use crate::repository::LoanRepository;
use crate::types::{Customer, CustomerId, CustomerRegistration, Loan, LoanId, LoanRequest};
use crate::views::{
    CreateLoanResponse, CustomerView, EligibilityResponse, LoanDetailView, LoanSummaryView,
};

/// request-facing workflow around the eligibility engine
///
/// Mutating operations take `&mut self`, so a single service instance never
/// evaluates two loan creations against the same stale obligation snapshot.
pub struct LendingService<R: LoanRepository> {
    repository: R,
    engine: EligibilityEngine,
    events: EventStore,
}

impl<R: LoanRepository> LendingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            engine: EligibilityEngine::standard(),
            events: EventStore::new(),
        }
    }

    pub fn with_policy(repository: R, policy: PolicyConfig) -> Result<Self> {
        Ok(Self {
            repository,
            engine: EligibilityEngine::new(policy)?,
            events: EventStore::new(),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// onboard a customer with an income-derived approved limit
    pub fn register_customer(
        &mut self,
        registration: CustomerRegistration,
        time_provider: &SafeTimeProvider,
    ) -> Result<CustomerView> {
        let customer_id = self.repository.next_customer_id()?;
        let customer = Customer::onboard(customer_id, registration, self.engine.policy())?;
        self.repository.insert_customer(customer.clone())?;

        tracing::info!(
            customer_id,
            approved_limit = %customer.approved_limit,
            "customer registered"
        );

        self.events.emit(Event::CustomerRegistered {
            customer_id,
            monthly_income: customer.monthly_income,
            approved_limit: customer.approved_limit,
            timestamp: time_provider.now(),
        });

        Ok(CustomerView::from_customer(&customer))
    }

    /// report whether a loan would be approved, without creating it
    pub fn check_eligibility(
        &mut self,
        customer_id: CustomerId,
        request: LoanRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<EligibilityResponse> {
        let outcome = self.assess(customer_id, &request, time_provider)?;
        Ok(EligibilityResponse::from_outcome(customer_id, &outcome))
    }

    /// decide and, when approved, persist the loan starting today
    pub fn create_loan(
        &mut self,
        customer_id: CustomerId,
        request: LoanRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<CreateLoanResponse> {
        let outcome = self.assess(customer_id, &request, time_provider)?;
        let now = time_provider.now();

        let start_date = match outcome.start_date {
            Some(start) if outcome.is_eligible() => start,
            _ => {
                tracing::info!(
                    customer_id,
                    reason = outcome.decision.reason.summary(),
                    "loan declined"
                );
                self.events.emit(Event::LoanDeclined {
                    customer_id,
                    amount: request.amount,
                    reason: outcome.decision.reason,
                    timestamp: now,
                });
                return Ok(CreateLoanResponse::declined(customer_id, &outcome));
            }
        };

        let loan = Loan::originate(customer_id, &request, outcome.applied_rate, start_date)?;
        self.repository.insert_loan(loan.clone())?;

        tracing::info!(
            customer_id,
            loan_id = %loan.loan_id,
            amount = %loan.loan_amount,
            end_date = %loan.end_date,
            "loan created"
        );

        self.events.emit(Event::LoanApproved {
            loan_id: loan.loan_id,
            customer_id,
            amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            monthly_installment: loan.monthly_repayment,
            start_date: loan.start_date,
            end_date: loan.end_date,
            timestamp: now,
        });

        Ok(CreateLoanResponse::approved(&loan))
    }

    pub fn view_loan(&self, loan_id: LoanId) -> Result<LoanDetailView> {
        let loan = self
            .repository
            .loan(loan_id)?
            .ok_or(LendingError::LoanNotFound { loan_id })?;
        let customer = self.find_customer(loan.customer_id)?;
        Ok(LoanDetailView::from_loan(&loan, &customer))
    }

    /// an unknown customer simply has no loans
    pub fn view_customer_loans(&self, customer_id: CustomerId) -> Result<Vec<LoanSummaryView>> {
        Ok(self
            .repository
            .loans_for_customer(customer_id)?
            .iter()
            .map(LoanSummaryView::from_loan)
            .collect())
    }

    fn find_customer(&self, customer_id: CustomerId) -> Result<Customer> {
        self.repository
            .customer(customer_id)?
            .ok_or(LendingError::CustomerNotFound { customer_id })
    }

    fn assess(
        &mut self,
        customer_id: CustomerId,
        request: &LoanRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<EligibilityOutcome> {
        let customer = self.find_customer(customer_id)?;
        let loans = self.repository.loans_for_customer(customer_id)?;
        let now = time_provider.now();

        let outcome = self
            .engine
            .evaluate(&customer, &loans, request, now.date_naive())?;

        self.events.emit(Event::EligibilityAssessed {
            customer_id,
            eligible: outcome.decision.eligible,
            reason: outcome.decision.reason,
            credit_score: outcome.decision.assessment.as_ref().map(|a| a.score),
            corrected_minimum_rate: outcome.decision.corrected_minimum_rate,
            timestamp: now,
        });

        Ok(outcome)
    }
}
