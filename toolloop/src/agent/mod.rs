//! Tool loop: bounded model/tool iteration with pluggable response parsing.
//!
//! # Main types
//!
//! - **[`ToolLoop`]**: Holds the LLM client, tool registry, parser, config and observer.
//! - **[`run_tool_loop`]**: The loop itself, over borrowed collaborators.
//! - **[`ToolCallParser`]**: Strategy trait; [`StructuredParser`], [`JsonArgumentsParser`]
//!   and [`FreeTextParser`] implement it, [`Strategy`] picks one by name.
//! - **[`LoopObserver`]** / **[`LoopEvent`]**: Step notifications; [`TracingObserver`] logs them.
//! - **[`LoopConfig`]**, **[`LoopOutcome`]**, **[`LoopError`]**.

mod config;
mod error;
mod observer;
mod parser;
mod runner;

pub use config::{LoopConfig, DEFAULT_MAX_ITERATIONS};
pub use error::LoopError;
pub use observer::{LoopEvent, LoopObserver, TracingObserver};
pub use parser::{
    FreeTextParser, JsonArgumentsParser, Strategy, StructuredParser, ToolCallParser,
    OBSERVATION_STOP_MARKER,
};
pub use runner::{run_tool_loop, LoopOutcome, ToolLoop};
