//! Per-run settings for [`ToolLoop`](super::ToolLoop).

/// Default number of model calls per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Loop budget, sampling temperature and optional operating instructions.
///
/// `max_iterations` counts model calls. A run executes at most
/// [`max_tool_calls`](Self::max_tool_calls) tools: a tool requested on the last
/// model call is not run and the loop reports exhaustion.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopConfig {
    pub max_iterations: usize,
    /// Sent to the model on every call; `None` leaves the transport default.
    pub temperature: Option<f32>,
    /// Replaces the strategy's default system prompt when set.
    pub system_prompt: Option<String>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: Some(0.0),
            system_prompt: None,
        }
    }
}

impl LoopConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Most tools a run can execute: `max_iterations - 1`.
    pub fn max_tool_calls(&self) -> usize {
        self.max_iterations.saturating_sub(1)
    }
}
