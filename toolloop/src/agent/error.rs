//! Terminal errors of a tool-loop run.

use crate::error::AgentError;
use crate::tools::ToolError;

/// Why a run stopped without an answer (exhaustion is not an error, see
/// [`LoopOutcome::Exhausted`](super::LoopOutcome::Exhausted)).
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    /// `max_iterations` was zero.
    #[error("max_iterations must be at least 1")]
    InvalidBudget,
    /// The model named a tool that is not in the registry. Display is the fixed
    /// user-visible string; the name is kept for logs and callers.
    #[error("Error: Tool not found")]
    ToolNotFound(String),
    /// The tool request could not be decoded into an argument mapping.
    #[error("could not decode arguments{}: {message}", for_tool(.tool))]
    ArgumentDecode {
        tool: Option<String>,
        message: String,
    },
    /// The tool ran and failed.
    #[error("tool failed: {0}")]
    Tool(#[from] ToolError),
    /// Model transport failure.
    #[error("model call failed: {0}")]
    Model(#[from] AgentError),
}

fn for_tool(tool: &Option<String>) -> String {
    tool.as_ref().map(|t| format!(" for {}", t)).unwrap_or_default()
}

impl LoopError {
    pub(crate) fn decode(tool: Option<&str>, message: impl Into<String>) -> Self {
        Self::ArgumentDecode {
            tool: tool.map(str::to_string),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_displays_fixed_text() {
        let e = LoopError::ToolNotFound("compute_tax".into());
        assert_eq!(e.to_string(), "Error: Tool not found");
    }

    #[test]
    fn argument_decode_display_names_tool_when_known() {
        let e = LoopError::decode(Some("apply_discount"), "expected object");
        assert_eq!(
            e.to_string(),
            "could not decode arguments for apply_discount: expected object"
        );
        let e = LoopError::decode(None, "bad json");
        assert_eq!(e.to_string(), "could not decode arguments: bad json");
    }

    #[test]
    fn model_and_tool_errors_convert() {
        let e: LoopError = AgentError::ExecutionFailed("connection refused".into()).into();
        assert!(matches!(e, LoopError::Model(_)));
        assert!(e.to_string().contains("connection refused"));

        let e: LoopError = ToolError::InvalidInput("missing price".into()).into();
        assert!(matches!(e, LoopError::Tool(_)));
    }
}
