//! LLM client abstraction for the tool loop.
//!
//! The loop depends on a callable that takes the conversation plus transport
//! options (tool specs, stop markers, temperature) and returns assistant text with
//! optional tool-call records. This module defines that trait, the request and
//! response types, a scripted mock and an Ollama chat client.

mod mock;
mod ollama;

pub use mock::{MockLlm, RecordedRequest};
pub use ollama::{ArgumentsEncoding, OllamaChat, DEFAULT_OLLAMA_HOST};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

/// One model call: the messages to send and the transport options for this turn.
///
/// `tools` is empty when the active parsing strategy describes tools in the prompt
/// instead of advertising them natively. `stop` lists markers at which the
/// transport must cut generation (the ReAct strategy passes `"\nObservation:"`).
#[derive(Clone, Copy, Debug)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
    pub tools: &'a [ToolSpec],
    pub stop: &'a [String],
    pub temperature: Option<f32>,
}

impl<'a> ChatRequest<'a> {
    /// Request with messages only: no tools, no stop markers, transport-default temperature.
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            tools: &[],
            stop: &[],
            temperature: None,
        }
    }
}

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion: assistant message text and optional tool calls.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; the active
/// [`ToolCallParser`](crate::agent::ToolCallParser) reads `tool_calls` (structured
/// strategies) or `content` (free-text strategy).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool-call records from this turn; empty when the model answered directly.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage for this call, when the transport reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Plain-text response without tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
            usage: None,
        }
    }

    /// Response carrying exactly one tool-call record.
    pub fn with_tool_call(content: impl Into<String>, call: ToolCall) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![call],
            usage: None,
        }
    }
}

/// LLM client: given a [`ChatRequest`], returns assistant text and optional tool calls.
///
/// Implementations: [`MockLlm`] (scripted responses), [`OllamaChat`] (local Ollama server).
/// Errors are not handled by the loop; they propagate to its caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn.
    async fn invoke(&self, request: &ChatRequest<'_>) -> Result<LlmResponse, AgentError>;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    async fn invoke(&self, request: &ChatRequest<'_>) -> Result<LlmResponse, AgentError> {
        (**self).invoke(request).await
    }
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for std::sync::Arc<T> {
    async fn invoke(&self, request: &ChatRequest<'_>) -> Result<LlmResponse, AgentError> {
        (**self).invoke(request).await
    }
}
