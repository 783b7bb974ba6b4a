//! Tree adapter over the tree-sitter Python grammar.
//!
//! Parsing is per-file; everything downstream borrows from the resulting
//! [`SourceTree`], so function units cannot outlive the tree they came from.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("source is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("failed to load Python grammar: {0}")]
    Language(String),

    #[error("tree-sitter produced no syntax tree")]
    Syntax,
}

/// A parsed Python source file together with its decoded text.
#[derive(Debug)]
pub struct SourceTree {
    tree: Tree,
    source: String,
}

/// One function definition discovered in a [`SourceTree`].
///
/// `node` is a non-owning handle into the tree; the lifetime parameter ties
/// every unit to the `SourceTree` that produced it.
pub struct FunctionUnit<'tree> {
    pub name: String,

    /// 1-based line of the `def` keyword.
    pub start_line: usize,

    /// 1-based line of the last statement.
    pub end_line: usize,

    /// Full source lines of the definition, including nested bodies.
    pub body: String,

    pub node: Node<'tree>,
}

impl SourceTree {
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let source = std::str::from_utf8(bytes)?.to_string();

        let mut parser = Parser::new();
        let language = tree_sitter_python::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser.parse(&source, None).ok_or(ParseError::Syntax)?;

        Ok(Self { tree, source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Enumerates every function definition in the file, at any nesting
    /// depth. A definition is named by its first identifier child; one
    /// without any identifier child is skipped.
    pub fn functions(&self) -> Vec<FunctionUnit<'_>> {
        let lines: Vec<&str> = self.source.lines().collect();
        let mut units = Vec::new();
        self.collect_functions(self.tree.root_node(), &lines, &mut units);
        units
    }

    fn collect_functions<'tree>(
        &'tree self,
        node: Node<'tree>,
        lines: &[&str],
        units: &mut Vec<FunctionUnit<'tree>>,
    ) {
        if node.kind() == "function_definition" {
            if let Some(name) = self.first_identifier_text(node) {
                let start = node.start_position().row;
                let end = node.end_position().row;
                let body = lines[start..=end.min(lines.len().saturating_sub(1))].join("\n");

                units.push(FunctionUnit {
                    name,
                    start_line: start + 1,
                    end_line: end + 1,
                    body,
                    node,
                });
            }
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_functions(child, lines, units);
            }
        }
    }

    fn first_identifier_text(&self, node: Node<'_>) -> Option<String> {
        for i in 0..node.child_count() {
            let child = node.child(i)?;
            if child.kind() == "identifier" {
                return child
                    .utf8_text(self.source.as_bytes())
                    .ok()
                    .map(str::to_string);
            }
        }
        None
    }
}
