//! Library side of the toolloop binaries.
//!
//! - [`run`]: the agent demo (`toolloop` binary): options, trace printing, offline scripts.
//! - [`repl`]: the support-bot question loop (`support-bot` binary).
//! - [`logging`]: file-only tracing setup shared by both binaries.

mod log_format;
pub mod logging;
pub mod repl;
pub mod run;

pub use repl::{run_support_loop, SUPPORT_BANNER};
pub use run::{demo_script, run_demo, DemoOptions, TracePrinter, DEFAULT_QUESTION};
