pub mod amortization;

pub use amortization::{
    calculate_emi, AmortizationCalculator, AmortizationSchedule, ScheduledPayment,
};
