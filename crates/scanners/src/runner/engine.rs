//! Per-file analysis orchestration.
//!
//! One file completes before the next starts; within a file, one function
//! completes before the next. The verifier call is the only suspension point
//! in the pipeline. File-level failures are recorded and never escalate to
//! run-level failure.

use crate::core::{Finding, FINDING_TYPE_NPD};
use crate::llm::PathVerifier;
use crate::report::{ScanReport, SkippedFile};
use crate::source::{
    find_attribute_accesses, find_sentinel_assignments, match_candidates, FunctionUnit,
    ParseError, SourceTree,
};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "py";

pub struct AnalysisEngine {
    verifier: PathVerifier,
}

impl AnalysisEngine {
    pub fn new(verifier: PathVerifier) -> Self {
        Self { verifier }
    }

    /// Analyzes a file or a directory tree. Cancellation is honored between
    /// files: the file in flight finishes, the rest of the queue is dropped
    /// and the partial report is returned with the interrupted flag set.
    pub async fn analyze_path(&self, target: &Path, cancel: &AtomicBool) -> Result<ScanReport> {
        if !target.exists() {
            bail!("target does not exist: {}", target.display());
        }

        let files = collect_source_files(target);
        info!("analyzing {} file(s) under {}", files.len(), target.display());

        let mut findings = Vec::new();
        let mut skipped = Vec::new();
        let mut files_scanned = 0usize;
        let mut interrupted = false;

        for file in files {
            if cancel.load(Ordering::SeqCst) {
                interrupted = true;
                break;
            }

            match self.analyze_file(&file).await {
                Ok(file_findings) => {
                    files_scanned += 1;
                    findings.extend(file_findings);
                }
                Err(e) => {
                    warn!("skipping {}: {}", file.display(), e);
                    skipped.push(SkippedFile {
                        path: file.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(ScanReport::new(findings, files_scanned, skipped).with_interrupted(interrupted))
    }

    /// Analyzes one file. A parse failure skips the file; the caller decides
    /// whether to continue with others.
    pub async fn analyze_file(&self, path: &Path) -> Result<Vec<Finding>, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let tree = SourceTree::parse(&bytes)?;
        let file_path = path.display().to_string();

        let units = tree.functions();
        info!("{}: {} function(s)", file_path, units.len());

        let mut findings = Vec::new();
        for unit in &units {
            findings.extend(self.analyze_function(unit, tree.source(), &file_path).await);
        }

        Ok(findings)
    }

    /// Extraction, matching and verification for one function unit. Findings
    /// come back in candidate discovery order.
    async fn analyze_function(
        &self,
        unit: &FunctionUnit<'_>,
        source: &str,
        file_path: &str,
    ) -> Vec<Finding> {
        debug!(
            "analyzing function {} (lines {}-{})",
            unit.name, unit.start_line, unit.end_line
        );

        let sources = find_sentinel_assignments(unit, source);
        if sources.is_empty() {
            return Vec::new();
        }

        let sinks = find_attribute_accesses(unit, source);
        if sinks.is_empty() {
            return Vec::new();
        }

        let candidates = match_candidates(unit, &sources, &sinks);
        debug!(
            "{}: {} None assignment(s), {} member access(es), {} candidate flow(s)",
            unit.name,
            sources.len(),
            sinks.len(),
            candidates.len()
        );

        let mut findings = Vec::new();
        for candidate in &candidates {
            let verdict = self.verifier.verify(candidate).await;

            if verdict.is_confirmed_bug {
                info!(
                    "confirmed: `{}` in {} ({} -> {}), severity {}",
                    candidate.variable,
                    unit.name,
                    candidate.source_line,
                    candidate.sink_line,
                    verdict.severity
                );
                findings.push(Finding {
                    finding_type: FINDING_TYPE_NPD.to_string(),
                    file: file_path.to_string(),
                    function: unit.name.clone(),
                    variable: candidate.variable.clone(),
                    null_line: candidate.source_line,
                    use_line: candidate.sink_line,
                    severity: verdict.severity,
                    trigger_condition: verdict.trigger_condition,
                    path_description: verdict.path_description,
                    rationale: verdict.rationale,
                    snippet: unit.body.clone(),
                });
            } else {
                debug!(
                    "cleared: `{}` ({} -> {}){}",
                    candidate.variable,
                    candidate.source_line,
                    candidate.sink_line,
                    verdict
                        .error
                        .as_deref()
                        .map(|e| format!(" [verifier degraded: {}]", e))
                        .unwrap_or_default()
                );
            }
        }

        findings
    }
}

/// A single file is taken as-is; directories are walked recursively for the
/// source extension. Paths are sorted for deterministic run order.
fn collect_source_files(target: &Path) -> Vec<PathBuf> {
    if target.is_file() {
        return vec![target.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == SOURCE_EXTENSION)
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_source_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("a.py"), "y = 2\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.py"), "z = 3\n").unwrap();

        let files = collect_source_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.py", "b.py", "c.py"]);
    }

    #[test]
    fn test_single_file_target_is_kept_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script");
        fs::write(&path, "x = 1\n").unwrap();

        let files = collect_source_files(&path);
        assert_eq!(files, vec![path]);
    }
}
