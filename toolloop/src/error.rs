//! Agent execution error types.
//!
//! Returned by [`LlmClient::invoke`](crate::llm::LlmClient::invoke) when the model
//! collaborator fails. The tool loop does not catch these; they surface as
//! [`LoopError::Model`](crate::agent::LoopError::Model).

use thiserror::Error;

/// Model transport error.
///
/// The loop never inspects the cause; it only propagates it.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. HTTP error, undecodable response body).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
