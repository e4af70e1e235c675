//! Analysis engine for turning commit batches into release decisions

pub mod release_analyzer;

pub use release_analyzer::{BatchReport, ReleaseAnalyzer, ReleaseDecision, RunContext};
