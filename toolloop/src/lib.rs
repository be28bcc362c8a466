//! # toolloop
//!
//! A bounded tool-invocation loop for chat models: send the conversation, read a tool
//! request out of the reply, run the named tool, feed the observation back, and
//! repeat until the model answers or the model-call budget runs out.
//!
//! ## Design
//!
//! - **One run, one conversation**: [`ToolLoop::run`] builds a [`Conversation`] from
//!   the system prompt and the question, appends one assistant message and (when a tool
//!   ran) one tool-result message per iteration, and drops it on return.
//! - **Budget**: `max_iterations` counts model calls; at most `max_iterations - 1`
//!   tools run. Exhaustion is [`LoopOutcome::Exhausted`], never an error.
//! - **Parsing strategies**: [`StructuredParser`] (native calls, object arguments),
//!   [`JsonArgumentsParser`] (native calls, JSON-string arguments) and
//!   [`FreeTextParser`] (ReAct `Action:` / `Action Input:` text with a
//!   `"\nObservation:"` stop marker). [`Strategy`] selects one by name.
//! - **Explicit tool set**: tools are registered in a [`ToolRegistry`] owned by the
//!   caller; each declares a static [`ToolSpec`].
//!
//! ## Main modules
//!
//! - [`agent`]: [`ToolLoop`], [`run_tool_loop`], parsers, [`LoopObserver`], errors.
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`OllamaChat`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`FnTool`], reference [`catalog`](tools::catalog).
//! - [`state`]: [`Conversation`], [`ToolCall`], [`ToolInvocation`].
//! - [`message`]: [`Message`].
//! - [`prompts`]: embedded YAML prompts with env overrides.
//! - [`settings`]: [`AgentSettings`] / [`QnaSettings`] from env.
//! - [`qna`]: knowledge-base client behind [`AnswerSource`].
//!
//! ## Quick start
//!
//! ```rust
//! use toolloop::{catalog_registry, LoopOutcome, MockLlm, ToolLoop};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let agent = ToolLoop::new(MockLlm::laptop_gold_discount(), catalog_registry());
//! let outcome = agent
//!     .run("What is the price of laptop after applying gold discount?")
//!     .await
//!     .unwrap();
//! assert!(matches!(outcome, LoopOutcome::Answer(ref s) if s.contains("849.15")));
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod qna;
pub mod settings;
pub mod state;
pub mod tools;

pub use agent::{
    run_tool_loop, FreeTextParser, JsonArgumentsParser, LoopConfig, LoopError, LoopEvent,
    LoopObserver, LoopOutcome, Strategy, StructuredParser, ToolCallParser, ToolLoop,
    TracingObserver, DEFAULT_MAX_ITERATIONS, OBSERVATION_STOP_MARKER,
};
pub use error::AgentError;
pub use llm::{
    ArgumentsEncoding, ChatRequest, LlmClient, LlmResponse, LlmUsage, MockLlm, OllamaChat,
    RecordedRequest, DEFAULT_OLLAMA_HOST,
};
pub use message::Message;
pub use qna::{AnswerSource, KbAnswer, KnowledgeBaseClient, QnaError, FALLBACK_ANSWER};
pub use settings::{AgentSettings, QnaSettings};
pub use state::{Conversation, ToolCall, ToolInvocation};
pub use tools::{
    catalog_registry, observation_text, FnTool, ParamKind, Tool, ToolError, ToolParam,
    ToolRegistry, ToolSpec,
};
