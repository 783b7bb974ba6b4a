//! Path-feasibility verification for candidate flows.
//!
//! The verifier treats the model as untrusted and possibly unavailable. Every
//! failure mode — transport error, timeout, unparseable reply — collapses
//! into a safe "not a bug" verdict carrying the failure detail, so an outage
//! costs recall, never the run.

use crate::core::Severity;
use crate::llm::config::LLMConfig;
use crate::llm::prompts::{path_analysis_prompt, SYSTEM_PROMPT};
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest};
use crate::llm::schemas::PathAnalysis;
use crate::source::Candidate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Judgement for one candidate flow.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub flow_exists: bool,
    pub is_confirmed_bug: bool,
    pub severity: Severity,
    pub trigger_condition: String,
    pub path_description: String,
    pub rationale: String,

    /// Failure detail when the verdict is a degraded default.
    pub error: Option<String>,
}

impl Verdict {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            flow_exists: false,
            is_confirmed_bug: false,
            severity: Severity::Low,
            trigger_condition: String::new(),
            path_description: String::new(),
            rationale: String::new(),
            error: Some(reason.into()),
        }
    }
}

impl From<PathAnalysis> for Verdict {
    fn from(analysis: PathAnalysis) -> Self {
        Self {
            flow_exists: analysis.has_dangerous_path,
            is_confirmed_bug: analysis.is_bug,
            severity: analysis.severity.into(),
            trigger_condition: analysis.trigger_condition,
            path_description: analysis.path_description,
            rationale: analysis.reason,
            error: None,
        }
    }
}

pub struct PathVerifier {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl PathVerifier {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            temperature: 0.0,
            max_tokens: 2000,
        }
    }

    pub fn from_config(provider: Arc<dyn LLMProvider>, config: &LLMConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Submits one candidate and always comes back with a verdict; failures
    /// degrade instead of propagating.
    pub async fn verify(&self, candidate: &Candidate<'_>) -> Verdict {
        match self.request_verdict(candidate).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    "verification failed for `{}` ({} -> {}): {}",
                    candidate.variable, candidate.source_line, candidate.sink_line, e
                );
                Verdict::degraded(e.to_string())
            }
        }
    }

    async fn request_verdict(&self, candidate: &Candidate<'_>) -> Result<Verdict, LLMError> {
        let request = LLMRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: path_analysis_prompt(candidate),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self.provider.analyze(request).await?;

        debug!("raw reply: {}", response.content);

        let body = extract_json(&response.content);
        let analysis: PathAnalysis = serde_json::from_str(body)
            .map_err(|e| LLMError::InvalidResponse(format!("JSON parse failed: {}", e)))?;

        Ok(analysis.into())
    }
}

/// Trims markdown code fences the model sometimes wraps around its JSON.
fn extract_json(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(stripped) = body.strip_prefix("```json") {
        body = stripped;
    } else if let Some(stripped) = body.strip_prefix("```") {
        body = stripped;
    }
    if let Some(stripped) = body.strip_suffix("```") {
        body = stripped;
    }
    body.trim()
}
