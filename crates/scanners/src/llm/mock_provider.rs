use crate::llm::{
    provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, TokenUsage},
    schemas::{PathAnalysis, SeverityLevel},
};
use async_trait::async_trait;

/// Deterministic stand-in for the network provider.
///
/// Responses are scripted by prompt substring; the first matching pattern
/// wins. Used by unit and pipeline tests, and interchangeable with
/// [`crate::llm::OpenAIProvider`] behind `Arc<dyn LLMProvider>`.
pub struct MockLLMProvider {
    responses: Vec<(String, PathAnalysis)>,
    default_response: PathAnalysis,
    raw_response: Option<String>,
    call_count: std::sync::atomic::AtomicUsize,
    should_fail: bool,
}

impl Default for MockLLMProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLLMProvider {
    /// A provider that judges every candidate safe.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_response: PathAnalysis::default(),
            raw_response: None,
            call_count: std::sync::atomic::AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// A provider whose every call fails at the transport level.
    pub fn failing() -> Self {
        let mut provider = Self::new();
        provider.should_fail = true;
        provider
    }

    /// A provider that replies with the given raw body, JSON or not.
    pub fn raw(body: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.raw_response = Some(body.into());
        provider
    }

    /// Scripts a response for prompts containing `pattern`.
    pub fn with_response(mut self, pattern: &str, response: PathAnalysis) -> Self {
        self.responses.push((pattern.to_string(), response));
        self
    }

    pub fn with_default_response(mut self, response: PathAnalysis) -> Self {
        self.default_response = response;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// A canned confirmed-bug analysis, handy for scripting.
    pub fn confirmed_bug(severity: SeverityLevel, trigger: &str) -> PathAnalysis {
        PathAnalysis {
            has_dangerous_path: true,
            is_bug: true,
            severity,
            trigger_condition: trigger.to_string(),
            path_description: "the variable stays None on at least one path".to_string(),
            reason: "no None check before the access".to_string(),
        }
    }

    fn select_response(&self, request: &LLMRequest) -> PathAnalysis {
        let combined = format!("{} {}", request.system_prompt, request.user_prompt);
        for (pattern, response) in &self.responses {
            if combined.contains(pattern.as_str()) {
                return response.clone();
            }
        }
        self.default_response.clone()
    }
}

#[async_trait]
impl LLMProvider for MockLLMProvider {
    async fn analyze(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.call_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if self.should_fail {
            return Err(LLMError::ApiError(
                "Mock provider configured to fail".to_string(),
            ));
        }

        let content = match &self.raw_response {
            Some(body) => body.clone(),
            None => serde_json::to_string(&self.select_response(&request))
                .map_err(|e| LLMError::InvalidResponse(e.to_string()))?,
        };

        Ok(LLMResponse {
            content,
            model: "mock-model".to_string(),
            usage: TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            },
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_prompt: &str) -> LLMRequest {
        LLMRequest {
            system_prompt: "analyze".to_string(),
            user_prompt: user_prompt.to_string(),
            temperature: 0.0,
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn test_default_response_is_safe() {
        let provider = MockLLMProvider::new();
        let response = provider.analyze(request("anything")).await.unwrap();

        let analysis: PathAnalysis = serde_json::from_str(&response.content).unwrap();
        assert!(!analysis.is_bug);
    }

    #[tokio::test]
    async fn test_scripted_response_matches_pattern() {
        let provider = MockLLMProvider::new().with_response(
            "data",
            MockLLMProvider::confirmed_bug(SeverityLevel::High, "flag=False"),
        );

        let response = provider.analyze(request("variable `data`")).await.unwrap();
        let analysis: PathAnalysis = serde_json::from_str(&response.content).unwrap();
        assert!(analysis.is_bug);
        assert_eq!(analysis.severity, SeverityLevel::High);
    }

    #[tokio::test]
    async fn test_call_counting() {
        let provider = MockLLMProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.analyze(request("one")).await.unwrap();
        provider.analyze(request("two")).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider_errors() {
        let provider = MockLLMProvider::failing();
        let result = provider.analyze(request("x")).await;
        assert!(result.is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_raw_body_is_passed_through() {
        let provider = MockLLMProvider::raw("not json at all");
        let response = provider.analyze(request("x")).await.unwrap();
        assert_eq!(response.content, "not json at all");
    }
}
