//! Wire format of the path-analysis reply.
//!
//! The reply is untrusted input: every field is optional on the wire, and
//! anything unrecognizable collapses to the safe default rather than failing
//! the run.

use crate::core::Severity;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl Default for SeverityLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl<'de> Deserialize<'de> for SeverityLevel {
    /// Case-insensitive; unrecognized values normalize to `Low` so the
    /// severity ranking downstream stays total.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        })
    }
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Critical => Severity::Critical,
            SeverityLevel::High => Severity::High,
            SeverityLevel::Medium => Severity::Medium,
            SeverityLevel::Low => Severity::Low,
        }
    }
}

/// Structured verdict as produced by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathAnalysis {
    #[serde(default)]
    pub has_dangerous_path: bool,

    #[serde(default)]
    pub is_bug: bool,

    #[serde(default)]
    pub severity: SeverityLevel,

    #[serde(default)]
    pub trigger_condition: String,

    #[serde(default)]
    pub path_description: String,

    #[serde(default)]
    pub reason: String,
}

impl PathAnalysis {
    /// JSON shape embedded into the prompt so the model answers in a form
    /// this module can parse.
    pub fn schema_definition() -> &'static str {
        r#"{
    "has_dangerous_path": true,
    "path_description": "describe the execution path, e.g. when flag is False the variable stays None",
    "trigger_condition": "condition that triggers the bug, e.g. flag=False",
    "is_bug": true,
    "severity": "High",
    "reason": "justification for the judgement"
}"#
    }
}
