//! Analysis execution and aggregation.
//!
//! The engine drives the whole pipeline for a file or directory target:
//! parse, enumerate functions, extract events, match candidates, verify each
//! candidate, and fold confirmed verdicts into the run's report.

pub mod engine;

pub use engine::{AnalysisEngine, SOURCE_EXTENSION};
