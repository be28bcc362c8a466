//! Message types for the tool-loop conversation.
//!
//! Roles: System (first in the list), User, Assistant (optionally carrying the tool
//! invocation it requested), and Tool (the observation produced by running that tool).

use serde::{Deserialize, Serialize};

use crate::state::ToolInvocation;

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply. `tool_call` is set when the reply asked for a tool.
    Assistant {
        content: String,
        tool_call: Option<ToolInvocation>,
    },
    /// Tool result fed back to the model.
    Tool {
        /// Observation text.
        content: String,
        /// Name of the tool that produced it.
        name: String,
        /// Correlation id of the request this answers, when the transport supplied one.
        call_id: Option<String>,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message without a tool invocation.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_call: None,
        }
    }

    /// Creates an assistant message that requested `invocation`.
    pub fn assistant_with_tool_call(content: impl Into<String>, invocation: ToolInvocation) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_call: Some(invocation),
        }
    }

    /// Creates a tool-result message.
    pub fn tool(
        name: impl Into<String>,
        content: impl Into<String>,
        call_id: Option<String>,
    ) -> Self {
        Self::Tool {
            content: content.into(),
            name: name.into(),
            call_id,
        }
    }

    /// Role name as used by chat transports (`system`, `user`, `assistant`, `tool`).
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    /// Text content of the message, whatever its role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) => s,
            Self::Assistant { content, .. } | Self::Tool { content, .. } => content,
        }
    }
}
