//! Nullaudit Scanners - Null Dereference Detection
//!
//! This crate finds candidate null-dereference flows in Python source by
//! pairing `x = None` assignments with later `x.member` accesses inside one
//! function, then delegates path feasibility and severity judgement to an
//! LLM behind a provider abstraction.

pub mod core;
pub mod llm;
pub mod report;
pub mod runner;
pub mod source;

pub use crate::core::{Finding, Severity};

pub use source::{
    find_attribute_accesses, find_sentinel_assignments, match_candidates, Candidate,
    FunctionUnit, ParseError, SinkEvent, SourceEvent, SourceTree,
};

pub use llm::{
    ConfigError, LLMConfig, LLMProvider, MockLLMProvider, OpenAIProvider, PathVerifier, Verdict,
};

pub use report::{ReportDocument, RunSummary, ScanReport, SkippedFile};

pub use runner::AnalysisEngine;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
