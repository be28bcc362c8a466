//! Human-readable trace of a run, one line per step.

use std::io::Write;
use std::sync::{Arc, Mutex};

use toolloop::{LoopEvent, LoopObserver};

/// Observer printing `Iteration: n`, `Tool call: ...`, `Tool observation: ...` and
/// `Agent response: ...` lines to a shared writer.
pub struct TracePrinter<W> {
    out: Arc<Mutex<W>>,
}

impl<W> TracePrinter<W> {
    pub fn new(out: Arc<Mutex<W>>) -> Self {
        Self { out }
    }
}

/// Line for `event`, or `None` for events that print nothing.
pub(crate) fn trace_line(event: &LoopEvent) -> Option<String> {
    match event {
        LoopEvent::ModelCall { iteration } => Some(format!("Iteration: {}", iteration)),
        LoopEvent::ToolCall { invocation, .. } => Some(format!(
            "Tool call: {} with args {}",
            invocation.name,
            serde_json::Value::Object(invocation.arguments.clone())
        )),
        LoopEvent::Observation { observation, .. } => {
            Some(format!("Tool observation: {}", observation))
        }
        LoopEvent::Finished { answer } => Some(format!("Agent response: {}", answer)),
        LoopEvent::ModelResponse { .. } | LoopEvent::Exhausted { .. } => None,
    }
}

impl<W: Write + Send> LoopObserver for TracePrinter<W> {
    fn on_event(&self, event: &LoopEvent) {
        let Some(line) = trace_line(event) else {
            return;
        };
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        // write errors do not stop the run
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolloop::ToolInvocation;

    #[test]
    fn trace_lines_match_demo_output() {
        assert_eq!(
            trace_line(&LoopEvent::ModelCall { iteration: 2 }).as_deref(),
            Some("Iteration: 2")
        );
        let invocation = ToolInvocation {
            name: "get_product_price".into(),
            arguments: json!({"product": "laptop"}).as_object().cloned().unwrap(),
            call_id: None,
        };
        assert_eq!(
            trace_line(&LoopEvent::ToolCall {
                iteration: 1,
                invocation
            })
            .as_deref(),
            Some("Tool call: get_product_price with args {\"product\":\"laptop\"}")
        );
        assert_eq!(
            trace_line(&LoopEvent::Observation {
                iteration: 1,
                name: "get_product_price".into(),
                observation: "999".into()
            })
            .as_deref(),
            Some("Tool observation: 999")
        );
        assert!(trace_line(&LoopEvent::Exhausted { max_iterations: 3 }).is_none());
    }

    #[test]
    fn printer_writes_lines() {
        let out = Arc::new(Mutex::new(Vec::<u8>::new()));
        let printer = TracePrinter::new(out.clone());
        printer.on_event(&LoopEvent::ModelCall { iteration: 1 });
        printer.on_event(&LoopEvent::Finished {
            answer: "849.15".into(),
        });
        let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "Iteration: 1\nAgent response: 849.15\n");
    }
}
