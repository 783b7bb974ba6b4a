//! LLM-backed path verification.
//!
//! The provider abstraction switches between the network client and a
//! deterministic mock, the schema module pins down the structured reply
//! format, and the verifier turns one candidate flow into one verdict. The
//! model is the only component allowed to reason about control flow; this
//! module's job is to keep its output safely parseable and its failures
//! non-fatal.

pub mod config;
pub mod mock_provider;
pub mod prompts;
pub mod provider;
pub mod schemas;
pub mod verifier;

pub use config::{ConfigError, LLMConfig};
pub use mock_provider::MockLLMProvider;
pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, OpenAIProvider, TokenUsage};
pub use schemas::{PathAnalysis, SeverityLevel};
pub use verifier::{PathVerifier, Verdict};
