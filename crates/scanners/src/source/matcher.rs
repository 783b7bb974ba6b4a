//! Pairs extracted events into verifiable candidate flows.

use crate::source::extract::{SinkEvent, SourceEvent};
use crate::source::parser::FunctionUnit;

/// A syntactically plausible flow from a `None` binding to a member access
/// on the same variable.
///
/// `source_line < sink_line` holds for every candidate; the ordering check is
/// textual only and says nothing about reachability, which is the verifier's
/// job.
pub struct Candidate<'t> {
    pub variable: String,
    pub source_line: usize,
    pub sink_line: usize,
    pub unit: &'t FunctionUnit<'t>,
}

/// Full cross product of sources and sinks, filtered to identical variables
/// with the source strictly preceding the sink. One source may pair with
/// several sinks and vice versa; precision is recovered downstream.
pub fn match_candidates<'t>(
    unit: &'t FunctionUnit<'t>,
    sources: &[SourceEvent],
    sinks: &[SinkEvent],
) -> Vec<Candidate<'t>> {
    let mut candidates = Vec::new();

    for source in sources {
        for sink in sinks {
            if source.variable == sink.variable && source.line < sink.line {
                candidates.push(Candidate {
                    variable: source.variable.clone(),
                    source_line: source.line,
                    sink_line: sink.line,
                    unit,
                });
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parser::SourceTree;

    fn source(variable: &str, line: usize) -> SourceEvent {
        SourceEvent {
            variable: variable.to_string(),
            line,
        }
    }

    fn sink(variable: &str, line: usize) -> SinkEvent {
        SinkEvent {
            variable: variable.to_string(),
            line,
        }
    }

    fn with_unit(test: impl Fn(&FunctionUnit<'_>)) {
        let tree = SourceTree::parse(b"def f():\n    pass\n").unwrap();
        let units = tree.functions();
        test(&units[0]);
    }

    #[test]
    fn test_no_sources_yields_nothing() {
        with_unit(|unit| {
            let candidates = match_candidates(unit, &[], &[sink("x", 5)]);
            assert!(candidates.is_empty());
        });
    }

    #[test]
    fn test_no_sinks_yields_nothing() {
        with_unit(|unit| {
            let candidates = match_candidates(unit, &[source("x", 2)], &[]);
            assert!(candidates.is_empty());
        });
    }

    #[test]
    fn test_equal_lines_never_pair() {
        with_unit(|unit| {
            let candidates = match_candidates(unit, &[source("x", 4)], &[sink("x", 4)]);
            assert!(candidates.is_empty());
        });
    }

    #[test]
    fn test_source_after_sink_never_pairs() {
        with_unit(|unit| {
            let candidates = match_candidates(unit, &[source("x", 8)], &[sink("x", 3)]);
            assert!(candidates.is_empty());
        });
    }

    #[test]
    fn test_distinct_variables_never_pair() {
        with_unit(|unit| {
            let candidates = match_candidates(unit, &[source("x", 2)], &[sink("y", 5)]);
            assert!(candidates.is_empty());
        });
    }

    #[test]
    fn test_full_cross_product() {
        with_unit(|unit| {
            let sources = [source("x", 1), source("x", 2)];
            let sinks = [sink("x", 5), sink("x", 6), sink("x", 7)];
            let candidates = match_candidates(unit, &sources, &sinks);

            assert_eq!(candidates.len(), 6);
            for candidate in &candidates {
                assert!(candidate.source_line < candidate.sink_line);
                assert_eq!(candidate.variable, "x");
            }
        });
    }

    #[test]
    fn test_mixed_ordering_keeps_only_forward_pairs() {
        with_unit(|unit| {
            let sources = [source("x", 4)];
            let sinks = [sink("x", 2), sink("x", 9)];
            let candidates = match_candidates(unit, &sources, &sinks);

            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].source_line, 4);
            assert_eq!(candidates[0].sink_line, 9);
        });
    }
}
