//! Source/sink event extraction.
//!
//! Both walks are purely syntactic pre-order traversals of one function's
//! subtree. No scope, type, or control-flow information is consulted; a
//! variable match downstream is textual.

use crate::source::parser::FunctionUnit;
use std::collections::HashSet;
use tree_sitter::Node;

/// A point where a variable is bound to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub variable: String,
    pub line: usize,
}

/// A point where a member of a variable is accessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEvent {
    pub variable: String,
    pub line: usize,
}

/// Collects `x = None` assignments anywhere in the function body.
///
/// Only plain identifier targets count; member paths and subscript targets
/// are skipped, and augmented assignments are a different node kind so they
/// never match.
pub fn find_sentinel_assignments(unit: &FunctionUnit<'_>, source: &str) -> Vec<SourceEvent> {
    let mut events = Vec::new();
    visit(unit.node, &mut |node| {
        if node.kind() != "assignment" {
            return;
        }
        let Some(right) = node.child_by_field_name("right") else {
            return;
        };
        if right.kind() != "none" {
            return;
        }
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        if let Ok(variable) = left.utf8_text(source.as_bytes()) {
            events.push(SourceEvent {
                variable: variable.to_string(),
                line: left.start_position().row + 1,
            });
        }
    });
    events
}

/// Collects `x.member` accesses anywhere in the function body.
///
/// An access counts only when its base is a plain identifier, so `a.b.c`
/// yields a single event for `a` at the innermost attribute node. Repeated
/// accesses to the same variable on the same line collapse into one event;
/// the `(variable, line)` key set is maintained during the walk.
pub fn find_attribute_accesses(unit: &FunctionUnit<'_>, source: &str) -> Vec<SinkEvent> {
    let mut events = Vec::new();
    let mut seen: HashSet<(String, usize)> = HashSet::new();

    visit(unit.node, &mut |node| {
        if node.kind() != "attribute" {
            return;
        }
        let Some(object) = node.child_by_field_name("object") else {
            return;
        };
        if object.kind() != "identifier" {
            return;
        }
        if let Ok(variable) = object.utf8_text(source.as_bytes()) {
            let line = object.start_position().row + 1;
            if seen.insert((variable.to_string(), line)) {
                events.push(SinkEvent {
                    variable: variable.to_string(),
                    line,
                });
            }
        }
    });

    events
}

fn visit<'t>(node: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    f(node);
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            visit(child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parser::SourceTree;

    fn first_unit(tree: &SourceTree) -> FunctionUnit<'_> {
        tree.functions().into_iter().next().expect("one function")
    }

    #[test]
    fn test_simple_none_assignment() {
        let tree = SourceTree::parse(b"def f():\n    x = None\n    return x.y\n").unwrap();
        let unit = first_unit(&tree);

        let sources = find_sentinel_assignments(&unit, tree.source());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].variable, "x");
        assert_eq!(sources[0].line, 2);
    }

    #[test]
    fn test_nested_none_assignment_is_found() {
        let code = b"def f(flag):\n    if flag:\n        while True:\n            data = None\n    return data\n";
        let tree = SourceTree::parse(code).unwrap();
        let unit = first_unit(&tree);

        let sources = find_sentinel_assignments(&unit, tree.source());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].variable, "data");
        assert_eq!(sources[0].line, 4);
    }

    #[test]
    fn test_member_and_subscript_targets_are_skipped() {
        let code = b"def f(obj, xs):\n    obj.field = None\n    xs[0] = None\n    ok = None\n";
        let tree = SourceTree::parse(code).unwrap();
        let unit = first_unit(&tree);

        let sources = find_sentinel_assignments(&unit, tree.source());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].variable, "ok");
    }

    #[test]
    fn test_non_sentinel_assignment_is_ignored() {
        let tree = SourceTree::parse(b"def f():\n    x = 1\n    y = None\n").unwrap();
        let unit = first_unit(&tree);

        let sources = find_sentinel_assignments(&unit, tree.source());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].variable, "y");
    }

    #[test]
    fn test_attribute_access_base_identifier() {
        let tree = SourceTree::parse(b"def f(user):\n    return user.name\n").unwrap();
        let unit = first_unit(&tree);

        let sinks = find_attribute_accesses(&unit, tree.source());
        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].variable, "user");
        assert_eq!(sinks[0].line, 2);
    }

    #[test]
    fn test_chained_access_reports_base_once() {
        let tree = SourceTree::parse(b"def f(a):\n    return a.b.c\n").unwrap();
        let unit = first_unit(&tree);

        let sinks = find_attribute_accesses(&unit, tree.source());
        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].variable, "a");
    }

    #[test]
    fn test_same_line_accesses_deduplicate() {
        let tree = SourceTree::parse(b"def f(u):\n    return u.first + u.last\n").unwrap();
        let unit = first_unit(&tree);

        let sinks = find_attribute_accesses(&unit, tree.source());
        assert_eq!(sinks.len(), 1);
        assert_eq!(sinks[0].variable, "u");
        assert_eq!(sinks[0].line, 2);
    }

    #[test]
    fn test_accesses_on_distinct_lines_are_kept() {
        let tree =
            SourceTree::parse(b"def f(u):\n    a = u.first\n    b = u.last\n    return a + b\n")
                .unwrap();
        let unit = first_unit(&tree);

        let sinks = find_attribute_accesses(&unit, tree.source());
        assert_eq!(sinks.len(), 2);
        assert_eq!(sinks[0].line, 2);
        assert_eq!(sinks[1].line, 3);
    }

    #[test]
    fn test_call_result_access_is_ignored() {
        let tree = SourceTree::parse(b"def f():\n    return get().value\n").unwrap();
        let unit = first_unit(&tree);

        let sinks = find_attribute_accesses(&unit, tree.source());
        assert!(sinks.is_empty());
    }
}
