pub mod calendar;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod errors;
pub mod events;
pub mod lending;
pub mod payments;
pub mod repository;
pub mod scoring;
pub mod types;
pub mod views;

// re-export key types
pub use calendar::add_months;
pub use config::{AffordabilityConfig, PolicyConfig, RateTier, ScoringConfig};
pub use decimal::{Money, Rate};
pub use eligibility::{
    DecisionReason, EligibilityDecision, EligibilityEngine, EligibilityOutcome, RateFloor,
};
pub use errors::{ErrorCategory, LendingError, Result};
pub use events::{Event, EventStore};
pub use lending::LendingService;
pub use payments::{calculate_emi, AmortizationCalculator, AmortizationSchedule, ScheduledPayment};
pub use repository::{InMemoryRepository, LoanRepository};
pub use scoring::{CreditAssessment, CreditScoringEngine, HistorySummary, ScoreBreakdown};
pub use types::{Customer, CustomerId, CustomerRegistration, Loan, LoanId, LoanRequest};
pub use views::{
    CreateLoanResponse, CustomerView, EligibilityResponse, LoanDetailView, LoanSummaryView,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
