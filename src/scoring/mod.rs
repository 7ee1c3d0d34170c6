pub mod credit_score;
pub mod history;

pub use credit_score::{CreditAssessment, CreditScoringEngine, ScoreBreakdown, LIMIT_EXCEEDED_NOTE};
pub use history::HistorySummary;
