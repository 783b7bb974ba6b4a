use crate::core::Severity;
use serde::{Deserialize, Serialize};

/// A confirmed null-dereference flow in one function.
///
/// Produced only for candidates the verifier judged to be real bugs; the
/// struct is never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub finding_type: String,

    pub file: String,

    pub function: String,

    pub variable: String,

    /// Line where the variable is bound to `None`.
    pub null_line: usize,

    /// Line where a member of the variable is accessed.
    pub use_line: usize,

    pub severity: Severity,

    pub trigger_condition: String,

    pub path_description: String,

    pub rationale: String,

    /// Source text of the enclosing function.
    pub snippet: String,
}

pub const FINDING_TYPE_NPD: &str = "Null Pointer Dereference (NPD)";

impl Finding {
    pub fn location(&self) -> String {
        format!("{}:{}→{}", self.file, self.null_line, self.use_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_format() {
        let finding = Finding {
            finding_type: FINDING_TYPE_NPD.to_string(),
            file: "app.py".to_string(),
            function: "handler".to_string(),
            variable: "user".to_string(),
            null_line: 3,
            use_line: 9,
            severity: Severity::High,
            trigger_condition: "flag is false".to_string(),
            path_description: String::new(),
            rationale: String::new(),
            snippet: String::new(),
        };
        assert_eq!(finding.location(), "app.py:3→9");
    }
}
