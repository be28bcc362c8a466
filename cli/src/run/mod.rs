//! Agent demo: one question through the tool loop with a printed trace.

mod display;
mod script;

pub use display::TracePrinter;
pub use script::demo_script;

use std::io::Write;
use std::sync::{Arc, Mutex};

use toolloop::{
    catalog_registry, AgentSettings, LlmClient, LoopConfig, LoopError, LoopOutcome, Strategy,
    ToolLoop,
};

/// Question asked when none is given on the command line.
pub const DEFAULT_QUESTION: &str = "What is the price of laptop after applying gold discount?";

const EXHAUSTED_MESSAGE: &str = "Max iterations reached without a final answer.";

/// What to run.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoOptions {
    pub question: String,
    pub strategy: Strategy,
    pub config: LoopConfig,
}

impl DemoOptions {
    /// Default question with the strategy and loop settings from `settings`.
    pub fn from_settings(settings: &AgentSettings) -> Self {
        Self {
            question: DEFAULT_QUESTION.to_string(),
            strategy: settings.strategy,
            config: settings.loop_config(),
        }
    }
}

/// Runs the demo and prints the trace followed by the result line(s).
///
/// Loop errors are printed (`Error: ...`), not returned; only write failures are errors.
pub async fn run_demo<W>(
    llm: impl LlmClient + 'static,
    opts: &DemoOptions,
    out: Arc<Mutex<W>>,
) -> std::io::Result<()>
where
    W: Write + Send + 'static,
{
    let agent = ToolLoop::new(llm, catalog_registry())
        .with_strategy(opts.strategy)
        .with_config(opts.config.clone())
        .with_observer(TracePrinter::new(out.clone()));

    tracing::info!(
        strategy = %opts.strategy,
        max_iterations = opts.config.max_iterations,
        "running demo"
    );
    let result = agent.run(&opts.question).await;

    let mut out = out.lock().unwrap_or_else(|p| p.into_inner());
    match result {
        Ok(LoopOutcome::Answer(answer)) => writeln!(out, "{}", answer)?,
        Ok(LoopOutcome::Exhausted) => writeln!(out, "{}", EXHAUSTED_MESSAGE)?,
        Err(LoopError::ToolNotFound(name)) => {
            writeln!(out, "Tool {} not found", name)?;
            writeln!(out, "{}", LoopError::ToolNotFound(name))?;
        }
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolloop::MockLlm;

    async fn run_to_string(llm: MockLlm, opts: &DemoOptions) -> String {
        let out = Arc::new(Mutex::new(Vec::<u8>::new()));
        run_demo(llm, opts, out.clone()).await.unwrap();
        let bytes = out.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn opts(strategy: Strategy) -> DemoOptions {
        DemoOptions {
            strategy,
            ..DemoOptions::from_settings(&AgentSettings::default())
        }
    }

    /// **Scenario**: every strategy's offline script prints the full trace and 849.15.
    #[tokio::test]
    async fn scripted_demo_prints_trace_for_each_strategy() {
        for strategy in [Strategy::Structured, Strategy::JsonArguments, Strategy::FreeText] {
            let text = run_to_string(demo_script(strategy), &opts(strategy)).await;
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines[0], "Iteration: 1", "{}", text);
            assert_eq!(
                lines[1],
                "Tool call: get_product_price with args {\"product\":\"laptop\"}"
            );
            assert_eq!(lines[2], "Tool observation: 999");
            assert_eq!(lines[3], "Iteration: 2");
            assert_eq!(lines[5], "Tool observation: 849.15");
            assert!(lines[7].starts_with("Agent response: "));
            assert!(lines.last().unwrap().contains("849.15"), "{}", text);
        }
    }

    #[test]
    fn options_take_loop_settings_from_agent_settings() {
        let settings = AgentSettings {
            max_iterations: 4,
            temperature: Some(0.3),
            strategy: Strategy::FreeText,
            ..AgentSettings::default()
        };
        let o = DemoOptions::from_settings(&settings);
        assert_eq!(o.question, DEFAULT_QUESTION);
        assert_eq!(o.strategy, Strategy::FreeText);
        assert_eq!(o.config, settings.loop_config());
        assert_eq!(o.config.max_iterations, 4);
        assert_eq!(o.config.temperature, Some(0.3));
    }

    #[tokio::test]
    async fn exhausted_run_prints_fixed_message() {
        let mut o = opts(Strategy::Structured);
        o.config.max_iterations = 1;
        let text = run_to_string(MockLlm::laptop_gold_discount(), &o).await;
        assert_eq!(
            text,
            "Iteration: 1\nMax iterations reached without a final answer.\n"
        );
    }

    #[tokio::test]
    async fn unknown_tool_prints_not_found() {
        let llm = MockLlm::always_calling("compute_tax", json!({"amount": 1}));
        let text = run_to_string(llm, &opts(Strategy::Structured)).await;
        assert!(
            text.ends_with(
                "Iteration: 1\nTool call: compute_tax with args {\"amount\":1}\nTool compute_tax not found\nError: Tool not found\n"
            ),
            "{}",
            text
        );
    }

    #[tokio::test]
    async fn other_errors_print_error_prefix() {
        let mut o = opts(Strategy::Structured);
        o.config.max_iterations = 0;
        let text = run_to_string(MockLlm::with_no_tool_calls("x"), &o).await;
        assert_eq!(text, "Error: max_iterations must be at least 1\n");
    }
}
