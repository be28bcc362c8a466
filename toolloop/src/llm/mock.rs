//! Mock LLM for tests and examples.
//!
//! Plays back a script of responses in order (the last one repeats once the script
//! runs out), records every request it receives, and honors stop markers by
//! truncating the scripted content at the first marker found.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{ChatRequest, LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// Snapshot of one request received by [`MockLlm`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    /// Names of the tools advertised natively on this call.
    pub tool_names: Vec<String>,
    pub stop: Vec<String>,
    pub temperature: Option<f32>,
}

/// Mock LLM: scripted assistant responses.
///
/// **Interaction**: Implements `LlmClient`; used by the tool-loop tests and the
/// CLI's offline demo.
pub struct MockLlm {
    script: Vec<LlmResponse>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockLlm {
    /// Creates a mock that returns `script[0]`, then `script[1]`, and so on.
    pub fn new(script: Vec<LlmResponse>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always answers with `content` and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(vec![LlmResponse::text(content)])
    }

    /// Creates a mock that always requests the same tool.
    pub fn always_calling(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self::new(vec![LlmResponse::with_tool_call(
            "",
            ToolCall {
                name: name.into(),
                arguments,
                id: Some("call-1".to_string()),
            },
        )])
    }

    /// Script for the product-pricing demo with native (object) tool arguments:
    /// price lookup, discount, final answer.
    pub fn laptop_gold_discount() -> Self {
        Self::new(vec![
            LlmResponse::with_tool_call(
                "",
                ToolCall {
                    name: "get_product_price".to_string(),
                    arguments: serde_json::json!({ "product": "laptop" }),
                    id: Some("call-1".to_string()),
                },
            ),
            LlmResponse::with_tool_call(
                "",
                ToolCall {
                    name: "apply_discount".to_string(),
                    arguments: serde_json::json!({ "price": 999, "discount_tier": "gold" }),
                    id: Some("call-2".to_string()),
                },
            ),
            LlmResponse::text(
                "The price of the laptop after applying the gold discount is 849.15.",
            ),
        ])
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, request: &ChatRequest<'_>) {
        let recorded = RecordedRequest {
            messages: request.messages.to_vec(),
            tool_names: request.tools.iter().map(|t| t.name.clone()).collect(),
            stop: request.stop.to_vec(),
            temperature: request.temperature,
        };
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(recorded);
    }
}

/// Cuts `content` at the earliest occurrence of any stop marker.
fn apply_stop_markers(content: &str, stop: &[String]) -> String {
    let cut = stop
        .iter()
        .filter(|m| !m.is_empty())
        .filter_map(|m| content.find(m.as_str()))
        .min();
    match cut {
        Some(i) => content[..i].to_string(),
        None => content.to_string(),
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, request: &ChatRequest<'_>) -> Result<LlmResponse, AgentError> {
        self.record(request);
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .get(n)
            .or_else(|| self.script.last())
            .ok_or_else(|| {
                AgentError::ExecutionFailed("mock llm has no scripted responses".to_string())
            })?;
        let mut response = scripted.clone();
        response.content = apply_stop_markers(&response.content, request.stop);
        Ok(response)
    }
}
