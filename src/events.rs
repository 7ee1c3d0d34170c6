use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::eligibility::DecisionReason;
use crate::types::{CustomerId, LoanId};

/// audit events emitted by the lending service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    CustomerRegistered {
        customer_id: CustomerId,
        monthly_income: Money,
        approved_limit: Money,
        timestamp: DateTime<Utc>,
    },
    EligibilityAssessed {
        customer_id: CustomerId,
        eligible: bool,
        reason: DecisionReason,
        credit_score: Option<u8>,
        corrected_minimum_rate: Option<Rate>,
        timestamp: DateTime<Utc>,
    },
    LoanApproved {
        loan_id: LoanId,
        customer_id: CustomerId,
        amount: Money,
        interest_rate: Rate,
        monthly_installment: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    LoanDeclined {
        customer_id: CustomerId,
        amount: Money,
        reason: DecisionReason,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
