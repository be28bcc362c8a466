//! Parsing strategies: how a tool request is read out of a model response.
//!
//! Each strategy also decides what the model sees: which system prompt, whether tool
//! specs are advertised natively, which stop markers the transport enforces, and how
//! the conversation is rendered into the message list.
//!
//! - [`StructuredParser`]: native tool calls with object arguments.
//! - [`JsonArgumentsParser`]: native tool calls with JSON-string arguments.
//! - [`FreeTextParser`]: ReAct text (`Action:` / `Action Input:` lines).

mod free_text;
mod json_args;
mod structured;

pub use free_text::{FreeTextParser, OBSERVATION_STOP_MARKER};
pub use json_args::JsonArgumentsParser;
pub use structured::StructuredParser;

use serde_json::{Map, Value};

use crate::agent::LoopError;
use crate::llm::{ArgumentsEncoding, LlmResponse};
use crate::message::Message;
use crate::prompts;
use crate::state::{Conversation, ToolCall, ToolInvocation};
use crate::tools::ToolRegistry;

/// Extracts zero or one tool request from a model response.
///
/// `Ok(None)` means the response is the final answer.
pub trait ToolCallParser: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn extract(&self, response: &LlmResponse) -> Result<Option<ToolInvocation>, LoopError>;

    /// Markers at which the transport must cut generation.
    fn stop_markers(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether tool specs are sent to the model natively.
    fn advertises_tools(&self) -> bool {
        true
    }

    /// System prompt for a run: `custom` when given, otherwise the loaded instructions
    /// (`TOOLLOOP_PROMPTS_FILE` or the embedded defaults).
    fn system_prompt(&self, custom: Option<&str>, _tools: &ToolRegistry) -> String {
        match custom {
            Some(s) => s.to_string(),
            None => prompts::load_or_default(None).system_prompt().to_string(),
        }
    }

    /// Message list sent to the model for the current conversation.
    fn prepare(&self, conversation: &Conversation) -> Vec<Message> {
        conversation.messages().to_vec()
    }
}

/// Which parsing strategy a run uses; selectable from the CLI and env.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    Structured,
    #[default]
    JsonArguments,
    FreeText,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::JsonArguments => "json",
            Self::FreeText => "react",
        }
    }

    pub fn parser(&self) -> Box<dyn ToolCallParser> {
        match self {
            Self::Structured => Box::new(StructuredParser),
            Self::JsonArguments => Box::new(JsonArgumentsParser),
            Self::FreeText => Box::new(FreeTextParser),
        }
    }

    /// Argument shape the transport must deliver for this strategy.
    pub fn arguments_encoding(&self) -> ArgumentsEncoding {
        match self {
            Self::JsonArguments => ArgumentsEncoding::JsonString,
            Self::Structured | Self::FreeText => ArgumentsEncoding::Native,
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Structured | Self::JsonArguments => "gpt-oss:20b",
            Self::FreeText => "qwen3:1.7b",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "native" => Ok(Self::Structured),
            "json" | "json_arguments" | "json-arguments" => Ok(Self::JsonArguments),
            "react" | "free_text" | "free-text" | "text" => Ok(Self::FreeText),
            _ => Err(format!(
                "unknown strategy: {} (use structured, json or react)",
                s
            )),
        }
    }
}

/// First record wins; later records in the same response are ignored.
fn first_call(response: &LlmResponse) -> Option<&ToolCall> {
    response.tool_calls.first()
}

fn into_object(tool: &str, value: Value) -> Result<Map<String, Value>, LoopError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(LoopError::decode(
            Some(tool),
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
