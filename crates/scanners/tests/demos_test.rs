//! Extraction coverage over the bundled demo fixtures.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use nullaudit_scanners::llm::SeverityLevel;
use nullaudit_scanners::{
    find_attribute_accesses, find_sentinel_assignments, match_candidates, AnalysisEngine,
    MockLLMProvider, PathVerifier, SourceTree,
};

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn test_fixture_functions_are_all_discovered() {
    let bytes = std::fs::read(demo_path("test_npd.py")).unwrap();
    let tree = SourceTree::parse(&bytes).unwrap();
    let names: Vec<String> = tree.functions().iter().map(|f| f.name.clone()).collect();

    assert_eq!(names.len(), 16);
    assert!(names.contains(&"bug1_simple".to_string()));
    assert!(names.contains(&"safe5_default_value".to_string()));
}

#[test]
fn test_buggy_shapes_produce_candidates() {
    let bytes = std::fs::read(demo_path("test_npd.py")).unwrap();
    let tree = SourceTree::parse(&bytes).unwrap();

    for unit in tree.functions() {
        let sources = find_sentinel_assignments(&unit, tree.source());
        let sinks = find_attribute_accesses(&unit, tree.source());
        let candidates = match_candidates(&unit, &sources, &sinks);

        match unit.name.as_str() {
            // Syntactic matching over-approximates: guarded and reassigned
            // variables still pair, the verifier sorts them out.
            "bug1_simple" | "bug2_conditional" | "bug4_complex" | "bug5_loop"
            | "safe1_with_check" | "safe2_early_return" | "safe3_always_assigned"
            | "safe4_exception_handling" | "safe5_default_value" => {
                assert!(
                    !candidates.is_empty(),
                    "{} should yield at least one candidate",
                    unit.name
                );
            }
            // No `x = None` in the function body, so nothing to pair.
            "bug3_parameter" => {
                assert!(candidates.is_empty());
            }
            _ => {}
        }
    }
}

#[tokio::test]
async fn test_demo_scan_with_scripted_verifier() {
    let provider = MockLLMProvider::new()
        .with_response(
            "`user`",
            MockLLMProvider::confirmed_bug(SeverityLevel::High, "no guard"),
        )
        .with_response(
            "`x`",
            MockLLMProvider::confirmed_bug(SeverityLevel::High, "direct"),
        );

    let engine = AnalysisEngine::new(PathVerifier::new(Arc::new(provider)));
    let cancel = AtomicBool::new(false);
    let report = engine
        .analyze_path(&demo_path("test_simple.py"), &cancel)
        .await
        .unwrap();

    // Both fixtures dereference `x` after a None binding; the scripted
    // verifier confirms both, so the guard in safe_guarded is invisible at
    // this level by design.
    assert_eq!(report.findings().len(), 2);
    assert_eq!(report.summary().files_affected, 1);
}
