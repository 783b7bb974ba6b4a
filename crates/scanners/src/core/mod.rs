//! Core types shared by the extraction pipeline and the reports.

pub mod result;
pub mod severity;

pub use result::{Finding, FINDING_TYPE_NPD};
pub use severity::Severity;
