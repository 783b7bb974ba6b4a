//! Prompt construction for path-feasibility analysis.

use crate::llm::schemas::PathAnalysis;
use crate::source::Candidate;

pub const SYSTEM_PROMPT: &str = "You are an expert code security analyst \
specializing in finding defects in Python code. You reason carefully about \
execution paths and answer only with the requested JSON.";

/// Builds the user prompt for one candidate flow. The whole function body is
/// included so the model can reason about every path between the two lines.
pub fn path_analysis_prompt(candidate: &Candidate<'_>) -> String {
    format!(
        r#"Analyze the following Python function for a null dereference risk.

Function code:
```python
{body}
```

Facts established by static analysis:
- variable `{variable}` is assigned None on line {null_line}
- a member of `{variable}` is accessed on line {use_line}

Answer these questions:
1. Is there an execution path from line {null_line} to line {use_line} on which the variable is still None when accessed?
2. If such a path exists, what condition triggers it (for example: some if condition is False)?
3. Is this a real bug, or is the access guarded (for example by `if x is not None`)?
4. How severe is the bug?

Respond with exactly this JSON shape and nothing else (no markdown fences):
{schema}

Notes:
- has_dangerous_path: true when a None-reaching path exists
- is_bug: true only when the access is actually reachable with None
- severity: one of Critical, High, Medium, Low
- if the access is guarded by a None check, is_bug must be false"#,
        body = candidate.unit.body,
        variable = candidate.variable,
        null_line = candidate.source_line,
        use_line = candidate.sink_line,
        schema = PathAnalysis::schema_definition(),
    )
}
