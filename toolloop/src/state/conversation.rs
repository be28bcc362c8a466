//! Conversation state plus the tool-call records that flow through it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::message::Message;

/// A single tool invocation as the model transport returned it.
///
/// `arguments` keeps the transport's shape: an object for native tool calling,
/// a JSON-encoded string for OpenAI-style transports. Parsing strategies decide
/// which shape they accept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the [`ToolRegistry`](crate::tools::ToolRegistry).
    pub name: String,
    /// Arguments as returned by the transport.
    pub arguments: Value,
    /// Optional correlation id, echoed back on the tool-result message.
    pub id: Option<String>,
}

/// The tool request extracted from one model response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    /// Decoded argument mapping, argument name to value.
    pub arguments: Map<String, Value>,
    /// Correlation id; `None` for free-text (ReAct) responses.
    pub call_id: Option<String>,
}

/// Ordered message list for one loop run.
///
/// Append-only: messages can be pushed and read, never edited or removed. Starts
/// with one system and one user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation from the operating instructions and the user's question.
    pub fn new(system_prompt: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt), Message::user(question)],
        }
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The first user message, i.e. the question this run answers.
    pub fn question(&self) -> Option<&str> {
        self.messages.iter().find_map(|m| match m {
            Message::User(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Appends one assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>, tool_call: Option<ToolInvocation>) {
        self.messages.push(Message::Assistant {
            content: content.into(),
            tool_call,
        });
    }

    /// Appends one tool-result message.
    pub fn push_tool_result(
        &mut self,
        name: impl Into<String>,
        observation: impl Into<String>,
        call_id: Option<String>,
    ) {
        self.messages.push(Message::tool(name, observation, call_id));
    }

    /// Content of the chronologically last assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Number of tool-result messages appended so far.
    pub fn tool_result_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| matches!(m, Message::Tool { .. }))
            .count()
    }
}
