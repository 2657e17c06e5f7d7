//! Sequence-of-returns risk: patterned stress paths and depletion analysis

mod scenarios;
mod risk;

pub use scenarios::{generate_sequence_scenarios, SequenceScenarios, RECOVERY_SHOCK};
pub use risk::{
    analyze_sequence_risk, summarize_sequence_risk, SequenceRiskResult, SequenceRiskSummary,
};
