//! The bounded tool loop: model call, tool dispatch, observation, repeat.

use tracing::{debug, info, info_span, warn, Instrument};

use super::config::LoopConfig;
use super::error::LoopError;
use super::observer::{LoopEvent, LoopObserver};
use super::parser::{Strategy, StructuredParser, ToolCallParser};
use crate::llm::{ChatRequest, LlmClient};
use crate::state::Conversation;
use crate::tools::{observation_text, ToolRegistry};

/// How a run ended when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model answered without requesting a tool.
    Answer(String),
    /// The model-call budget ran out first.
    Exhausted,
}

impl LoopOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answer(s) => Some(s),
            Self::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Runs one question to completion.
///
/// Each iteration calls the model once. A response without a tool request ends the
/// run with [`LoopOutcome::Answer`]. A tool request naming an unregistered tool ends
/// it with [`LoopError::ToolNotFound`], even when its arguments do not decode; the
/// observer still sees the request as a `ToolCall` event. A tool requested on the last allowed model
/// call is not executed and the run reports [`LoopOutcome::Exhausted`]. Otherwise the
/// tool runs and its observation is appended before the next call.
///
/// The conversation lives only for the duration of this call.
pub async fn run_tool_loop(
    question: &str,
    llm: &dyn LlmClient,
    tools: &ToolRegistry,
    parser: &dyn ToolCallParser,
    config: &LoopConfig,
    observer: Option<&dyn LoopObserver>,
) -> Result<LoopOutcome, LoopError> {
    let notify = |event: LoopEvent| {
        if let Some(o) = observer {
            o.on_event(&event);
        }
    };

    if config.max_iterations == 0 {
        warn!("tool loop started with max_iterations = 0");
        return Err(LoopError::InvalidBudget);
    }

    let system_prompt = parser.system_prompt(config.system_prompt.as_deref(), tools);
    let mut conversation = Conversation::new(system_prompt, question);
    let specs = if parser.advertises_tools() {
        tools.list()
    } else {
        Vec::new()
    };
    let stop = parser.stop_markers();

    for iteration in 1..=config.max_iterations {
        debug!(
            iteration,
            max_iterations = config.max_iterations,
            strategy = parser.name(),
            messages = conversation.len(),
            "model call"
        );
        notify(LoopEvent::ModelCall { iteration });

        let messages = parser.prepare(&conversation);
        let request = ChatRequest {
            messages: &messages,
            tools: &specs,
            stop: &stop,
            temperature: config.temperature,
        };
        let response = llm.invoke(&request).await.map_err(|e| {
            warn!(iteration, error = %e, "model call failed");
            LoopError::Model(e)
        })?;
        notify(LoopEvent::ModelResponse {
            iteration,
            content: response.content.clone(),
        });

        let invocation = match parser.extract(&response) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => {
                debug!(iteration, "final answer");
                notify(LoopEvent::Finished {
                    answer: response.content.clone(),
                });
                conversation.push_assistant(response.content.clone(), None);
                return Ok(LoopOutcome::Answer(response.content));
            }
            // the tool name is checked before its arguments
            Err(LoopError::ArgumentDecode {
                tool: Some(ref name),
                ..
            }) if !tools.contains(name) => {
                warn!(iteration, tool = %name, "tool not found");
                return Err(LoopError::ToolNotFound(name.clone()));
            }
            Err(e) => {
                warn!(iteration, error = %e, "tool request could not be decoded");
                return Err(e);
            }
        };

        if !tools.contains(&invocation.name) {
            warn!(iteration, tool = %invocation.name, "tool not found");
            notify(LoopEvent::ToolCall {
                iteration,
                invocation: invocation.clone(),
            });
            return Err(LoopError::ToolNotFound(invocation.name));
        }

        if iteration == config.max_iterations {
            debug!(
                iteration,
                tool = %invocation.name,
                "tool requested on the last model call; not executed"
            );
            break;
        }

        info!(iteration, tool = %invocation.name, "tool call");
        notify(LoopEvent::ToolCall {
            iteration,
            invocation: invocation.clone(),
        });
        let value = tools
            .call(&invocation.name, &invocation.arguments)
            .await
            .map_err(|e| {
                warn!(iteration, tool = %invocation.name, error = %e, "tool failed");
                LoopError::Tool(e)
            })?;
        let observation = observation_text(&value);
        notify(LoopEvent::Observation {
            iteration,
            name: invocation.name.clone(),
            observation: observation.clone(),
        });

        let name = invocation.name.clone();
        let call_id = invocation.call_id.clone();
        conversation.push_assistant(response.content, Some(invocation));
        conversation.push_tool_result(name, observation, call_id);
    }

    info!(
        max_iterations = config.max_iterations,
        tool_results = conversation.tool_result_count(),
        "max iterations reached without a final answer"
    );
    notify(LoopEvent::Exhausted {
        max_iterations: config.max_iterations,
    });
    Ok(LoopOutcome::Exhausted)
}

/// Owns an LLM client, a tool registry, a parsing strategy and the loop settings.
///
/// ```rust,no_run
/// use toolloop::{catalog_registry, LoopOutcome, OllamaChat, Strategy, ToolLoop};
///
/// # async fn demo() -> Result<(), toolloop::LoopError> {
/// let strategy = Strategy::JsonArguments;
/// let llm = OllamaChat::new(strategy.default_model())
///     .with_arguments_encoding(strategy.arguments_encoding());
/// let agent = ToolLoop::new(llm, catalog_registry()).with_strategy(strategy);
/// if let LoopOutcome::Answer(text) = agent
///     .run("What is the price of laptop after applying gold discount?")
///     .await?
/// {
///     println!("{}", text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ToolLoop {
    llm: Box<dyn LlmClient>,
    tools: ToolRegistry,
    parser: Box<dyn ToolCallParser>,
    config: LoopConfig,
    observer: Option<Box<dyn LoopObserver>>,
}

impl ToolLoop {
    /// Loop with the structured strategy and default settings.
    pub fn new(llm: impl LlmClient + 'static, tools: ToolRegistry) -> Self {
        Self {
            llm: Box::new(llm),
            tools,
            parser: Box::new(StructuredParser),
            config: LoopConfig::default(),
            observer: None,
        }
    }

    pub fn with_parser(mut self, parser: impl ToolCallParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.parser = strategy.parser();
        self
    }

    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    pub fn with_observer(mut self, observer: impl LoopObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Runs `question`; see [`run_tool_loop`].
    pub async fn run(&self, question: &str) -> Result<LoopOutcome, LoopError> {
        run_tool_loop(
            question,
            self.llm.as_ref(),
            &self.tools,
            self.parser.as_ref(),
            &self.config,
            self.observer.as_deref(),
        )
        .instrument(info_span!("tool_loop", strategy = self.parser.name()))
        .await
    }
}

impl std::fmt::Debug for ToolLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolLoop")
            .field("tools", &self.tools)
            .field("parser", &self.parser.name())
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
