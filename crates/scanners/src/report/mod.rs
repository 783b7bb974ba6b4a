//! Aggregated results of one analysis run.
//!
//! The report owns the finding list for a run. Findings stay in discovery
//! order; ranking and summary counts are derived views that never mutate the
//! list. Rendering to JSON, Markdown and HTML are pure projections.

pub mod html;

use crate::core::{Finding, Severity};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::Path;

pub const TOOL_NAME: &str = "nullaudit";
pub const TOOL_DESCRIPTION: &str =
    "LLM-verified null dereference detection for Python, source/sink candidate matching";

/// A file the run could not analyze, kept so the summary never silently
/// omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct ScanReport {
    findings: Vec<Finding>,
    files_scanned: usize,
    skipped: Vec<SkippedFile>,
    interrupted: bool,
    scan_time: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeverityCount {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Derived run-level counts.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,

    /// Distinct files with at least one finding.
    pub files_affected: usize,

    pub by_severity: BTreeMap<String, usize>,
}

/// The structured output document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportDocument {
    pub tool: String,
    pub description: String,
    pub scan_time: DateTime<Utc>,
    pub total_bugs: usize,
    pub bugs: Vec<Finding>,
    pub summary: RunSummary,
    pub files_scanned: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped_files: Vec<SkippedFile>,
}

impl ScanReport {
    pub fn new(findings: Vec<Finding>, files_scanned: usize, skipped: Vec<SkippedFile>) -> Self {
        Self {
            findings,
            files_scanned,
            skipped,
            interrupted: false,
            scan_time: Utc::now(),
        }
    }

    pub fn with_interrupted(mut self, interrupted: bool) -> Self {
        self.interrupted = interrupted;
        self
    }

    /// Findings in extraction discovery order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Presentation order: most severe first, ties keep discovery order.
    pub fn ranked(&self) -> Vec<&Finding> {
        let mut ranked: Vec<&Finding> = self.findings.iter().collect();
        ranked.sort_by_key(|f| Reverse(f.severity));
        ranked
    }

    pub fn count_by_severity(&self) -> SeverityCount {
        let mut count = SeverityCount::default();
        for finding in &self.findings {
            match finding.severity {
                Severity::Critical => count.critical += 1,
                Severity::High => count.high += 1,
                Severity::Medium => count.medium += 1,
                Severity::Low => count.low += 1,
            }
        }
        count
    }

    pub fn summary(&self) -> RunSummary {
        let mut by_severity: BTreeMap<String, usize> = BTreeMap::new();
        let mut files: std::collections::HashSet<&str> = std::collections::HashSet::new();

        for finding in &self.findings {
            *by_severity.entry(finding.severity.to_string()).or_insert(0) += 1;
            files.insert(finding.file.as_str());
        }

        RunSummary {
            total: self.findings.len(),
            files_affected: files.len(),
            by_severity,
        }
    }

    pub fn to_document(&self) -> ReportDocument {
        let ranked: Vec<Finding> = self.ranked().into_iter().cloned().collect();
        ReportDocument {
            tool: TOOL_NAME.to_string(),
            description: TOOL_DESCRIPTION.to_string(),
            scan_time: self.scan_time,
            total_bugs: self.findings.len(),
            bugs: ranked,
            summary: self.summary(),
            files_scanned: self.files_scanned,
            skipped_files: self.skipped.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::from("# Null Dereference Scan Report\n\n");

        let count = self.count_by_severity();
        md.push_str("## Summary\n\n");
        md.push_str(&format!("- Critical: {}\n", count.critical));
        md.push_str(&format!("- High: {}\n", count.high));
        md.push_str(&format!("- Medium: {}\n", count.medium));
        md.push_str(&format!("- Low: {}\n", count.low));
        md.push_str(&format!("- Files scanned: {}\n\n", self.files_scanned));

        if !self.skipped.is_empty() {
            md.push_str("## Skipped Files\n\n");
            for skip in &self.skipped {
                md.push_str(&format!("- `{}`: {}\n", skip.path, skip.reason));
            }
            md.push('\n');
        }

        if !self.findings.is_empty() {
            md.push_str("## Findings\n\n");
            for finding in self.ranked() {
                md.push_str(&format!(
                    "### {} {}: `{}` in `{}`\n\n",
                    finding.severity.emoji(),
                    finding.severity,
                    finding.variable,
                    finding.function
                ));
                md.push_str(&format!(
                    "**Location:** {} (None at line {}, used at line {})\n\n",
                    finding.file, finding.null_line, finding.use_line
                ));
                if !finding.trigger_condition.is_empty() {
                    md.push_str(&format!("**Trigger:** {}\n\n", finding.trigger_condition));
                }
                if !finding.path_description.is_empty() {
                    md.push_str(&format!("**Path:** {}\n\n", finding.path_description));
                }
                if !finding.rationale.is_empty() {
                    md.push_str(&format!("{}\n\n", finding.rationale));
                }
                md.push_str(&format!("```python\n{}\n```\n\n", finding.snippet));
            }
        }

        md
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        write_with_parents(path.as_ref(), &self.to_json()?)
    }

    pub fn write_html(&self, path: impl AsRef<Path>) -> Result<()> {
        write_with_parents(path.as_ref(), &html::render(self))
    }
}

fn write_with_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}
