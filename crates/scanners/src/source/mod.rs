//! Source-level analysis over the tree-sitter Python AST.
//!
//! The adapter wraps parsing and function discovery, the extractor walks one
//! function's subtree for sentinel assignments and member accesses, and the
//! matcher pairs those events into candidate flows for verification.

pub mod extract;
pub mod matcher;
pub mod parser;

pub use extract::{find_attribute_accesses, find_sentinel_assignments, SinkEvent, SourceEvent};
pub use matcher::{match_candidates, Candidate};
pub use parser::{FunctionUnit, ParseError, SourceTree};
