//! Ollama chat client implementing `LlmClient` (`POST {base}/api/chat`, non-streaming).
//!
//! Messages map to Ollama roles (`system`, `user`, `assistant`, `tool`). Tool specs,
//! when the request carries any, are sent in function format with their JSON Schema;
//! temperature and stop markers go into `options`. The reply's
//! `message.tool_calls[].function` records become [`ToolCall`]s.
//!
//! Ollama returns tool arguments as JSON objects. [`ArgumentsEncoding::JsonString`]
//! re-encodes them as JSON strings, the shape OpenAI-style transports use, so the
//! JSON-arguments strategy can run against the same server.
//!
//! **Interaction**: Implements `LlmClient`; used by the CLI like `MockLlm` is used in tests.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{ChatRequest, LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;
use crate::state::ToolCall;

/// Default Ollama server address.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// How tool-call arguments are handed to the parsing strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArgumentsEncoding {
    /// Keep arguments as JSON objects (structured strategy).
    #[default]
    Native,
    /// Re-encode arguments as JSON strings (JSON-arguments strategy).
    JsonString,
}

impl std::str::FromStr for ArgumentsEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "object" => Ok(Self::Native),
            "json" | "json_string" | "string" => Ok(Self::JsonString),
            _ => Err(format!(
                "unknown arguments encoding: {} (use native or json)",
                s
            )),
        }
    }
}

/// Ollama chat client.
pub struct OllamaChat {
    client: reqwest::Client,
    base_url: String,
    model: String,
    encoding: ArgumentsEncoding,
}

impl OllamaChat {
    /// Client for `model` on the default host.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_OLLAMA_HOST.to_string(),
            model: model.into(),
            encoding: ArgumentsEncoding::Native,
        }
    }

    /// Set the server base URL (e.g. `http://gpu-box:11434`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set how tool-call arguments are returned.
    pub fn with_arguments_encoding(mut self, encoding: ArgumentsEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }

    /// Request body for `/api/chat`.
    pub fn request_body(&self, request: &ChatRequest<'_>) -> Value {
        let messages: Vec<Value> = request.messages.iter().map(message_to_json).collect();
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        if !request.tools.is_empty() {
            let tools: Vec<Value> = request
                .tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description.clone().unwrap_or_default(),
                            "parameters": t.input_schema(),
                        }
                    })
                })
                .collect();
            body["tools"] = Value::Array(tools);
        }

        let mut options = Map::new();
        if let Some(t) = request.temperature {
            options.insert("temperature".to_string(), json!(t));
        }
        if !request.stop.is_empty() {
            options.insert("stop".to_string(), json!(request.stop));
        }
        if !options.is_empty() {
            body["options"] = Value::Object(options);
        }
        body
    }
}

fn message_to_json(message: &Message) -> Value {
    match message {
        Message::System(s) => json!({ "role": "system", "content": s }),
        Message::User(s) => json!({ "role": "user", "content": s }),
        Message::Assistant { content, tool_call } => {
            let mut m = json!({ "role": "assistant", "content": content });
            if let Some(tc) = tool_call {
                let mut call = json!({
                    "function": {
                        "name": tc.name,
                        "arguments": Value::Object(tc.arguments.clone()),
                    }
                });
                if let Some(id) = &tc.call_id {
                    call["id"] = json!(id);
                }
                m["tool_calls"] = json!([call]);
            }
            m
        }
        Message::Tool {
            content,
            name,
            call_id,
        } => {
            let mut m = json!({ "role": "tool", "content": content, "tool_name": name });
            if let Some(id) = call_id {
                m["tool_call_id"] = json!(id);
            }
            m
        }
    }
}

/// Parses an `/api/chat` response body.
pub fn parse_chat_response(
    body: &Value,
    encoding: ArgumentsEncoding,
) -> Result<LlmResponse, AgentError> {
    if let Some(err) = body.get("error").and_then(Value::as_str) {
        return Err(AgentError::ExecutionFailed(format!("Ollama error: {}", err)));
    }
    let message = body.get("message").ok_or_else(|| {
        AgentError::ExecutionFailed("Ollama response has no message".to_string())
    })?;
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut tool_calls = Vec::new();
    if let Some(records) = message.get("tool_calls").and_then(Value::as_array) {
        for record in records {
            let Some(function) = record.get("function") else {
                continue;
            };
            let name = function
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let raw = function.get("arguments").cloned().unwrap_or(Value::Null);
            let arguments = match (encoding, raw) {
                (ArgumentsEncoding::JsonString, Value::String(s)) => Value::String(s),
                (ArgumentsEncoding::JsonString, Value::Null) => Value::String("{}".to_string()),
                (ArgumentsEncoding::JsonString, other) => Value::String(other.to_string()),
                (ArgumentsEncoding::Native, other) => other,
            };
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string);
            tool_calls.push(ToolCall {
                name,
                arguments,
                id,
            });
        }
    }

    let count = |key: &str| body.get(key).and_then(Value::as_u64).map(|n| n as u32);
    let usage = match (count("prompt_eval_count"), count("eval_count")) {
        (None, None) => None,
        (p, c) => {
            let prompt_tokens = p.unwrap_or(0);
            let completion_tokens = c.unwrap_or(0);
            Some(LlmUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            })
        }
    };

    Ok(LlmResponse {
        content,
        tool_calls,
        usage,
    })
}

#[async_trait]
impl LlmClient for OllamaChat {
    async fn invoke(&self, request: &ChatRequest<'_>) -> Result<LlmResponse, AgentError> {
        let url = self.chat_url();
        let body = self.request_body(request);
        debug!(
            url = %url,
            model = %self.model,
            message_count = request.messages.len(),
            tools_count = request.tools.len(),
            temperature = ?request.temperature,
            stop = ?request.stop,
            "Ollama chat"
        );
        trace!(url = %url, request = %body, "Ollama request body");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response.json().await.map_err(|e| {
            AgentError::ExecutionFailed(format!("Ollama response decode failed: {}", e))
        })?;
        trace!(url = %url, status = %status, response = %payload, "Ollama response body");

        if !status.is_success() {
            let detail = payload
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| payload.to_string());
            return Err(AgentError::ExecutionFailed(format!(
                "Ollama returned {}: {}",
                status, detail
            )));
        }

        parse_chat_response(&payload, self.encoding)
    }
}
