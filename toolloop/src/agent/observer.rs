//! Per-step notifications from a tool-loop run.
//!
//! Observers see every model call, response, tool dispatch and observation. They have
//! no influence on the run; a loop without an observer makes no calls.

use tracing::{debug, info};

use crate::state::ToolInvocation;

/// One step of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopEvent {
    /// About to call the model (1-based).
    ModelCall { iteration: usize },
    /// Raw assistant text returned by the model.
    ModelResponse { iteration: usize, content: String },
    /// A tool request: about to execute, or naming an unknown tool just before the
    /// run stops.
    ToolCall {
        iteration: usize,
        invocation: ToolInvocation,
    },
    /// Tool result, already coerced to text.
    Observation {
        iteration: usize,
        name: String,
        observation: String,
    },
    /// The model answered without requesting a tool.
    Finished { answer: String },
    /// Budget spent without a final answer.
    Exhausted { max_iterations: usize },
}

/// Receives [`LoopEvent`]s in order.
pub trait LoopObserver: Send + Sync {
    fn on_event(&self, event: &LoopEvent);
}

impl<F> LoopObserver for F
where
    F: Fn(&LoopEvent) + Send + Sync,
{
    fn on_event(&self, event: &LoopEvent) {
        self(event)
    }
}

/// Logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl LoopObserver for TracingObserver {
    fn on_event(&self, event: &LoopEvent) {
        match event {
            LoopEvent::ModelCall { iteration } => debug!(iteration, "model call"),
            LoopEvent::ModelResponse { iteration, content } => {
                debug!(iteration, content_len = content.len(), content = %content, "model response")
            }
            LoopEvent::ToolCall {
                iteration,
                invocation,
            } => info!(
                iteration,
                tool = %invocation.name,
                arguments = %serde_json::Value::Object(invocation.arguments.clone()),
                "tool call"
            ),
            LoopEvent::Observation {
                iteration,
                name,
                observation,
            } => info!(iteration, tool = %name, observation = %observation, "tool observation"),
            LoopEvent::Finished { answer } => info!(answer = %answer, "final answer"),
            LoopEvent::Exhausted { max_iterations } => {
                info!(max_iterations, "max iterations reached without a final answer")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_are_observers() {
        let seen = Mutex::new(Vec::new());
        let observer = |e: &LoopEvent| seen.lock().unwrap().push(e.clone());
        observer.on_event(&LoopEvent::ModelCall { iteration: 1 });
        observer.on_event(&LoopEvent::Finished {
            answer: "done".into(),
        });
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], LoopEvent::ModelCall { iteration: 1 });
    }

    #[test]
    fn tracing_observer_accepts_every_event() {
        let events = [
            LoopEvent::ModelCall { iteration: 1 },
            LoopEvent::ModelResponse {
                iteration: 1,
                content: "hi".into(),
            },
            LoopEvent::ToolCall {
                iteration: 1,
                invocation: ToolInvocation::default(),
            },
            LoopEvent::Observation {
                iteration: 1,
                name: "get_product_price".into(),
                observation: "999".into(),
            },
            LoopEvent::Finished {
                answer: "999".into(),
            },
            LoopEvent::Exhausted { max_iterations: 3 },
        ];
        for e in &events {
            TracingObserver.on_event(e);
        }
    }
}
