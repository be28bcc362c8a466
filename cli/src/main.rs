//! `toolloop` binary: asks one question through the tool loop and prints the trace.
//!
//! Talks to a local Ollama server unless `--mock` is given. Exit code is 0 whatever the
//! run outcome (answer, exhaustion or loop error); only usage errors exit non-zero.

use std::sync::{Arc, Mutex};

use clap::Parser;
use cli::{demo_script, run_demo, DemoOptions};
use toolloop::{AgentSettings, Strategy};

#[derive(Parser, Debug)]
#[command(name = "toolloop")]
#[command(about = "Toolloop: answer a pricing question with tools through a local model")]
struct Args {
    /// Parsing strategy: structured, json or react (default: TOOLLOOP_STRATEGY or json)
    #[arg(short, long, value_name = "STRATEGY")]
    strategy: Option<Strategy>,

    /// Maximum number of model calls (default: TOOLLOOP_MAX_ITERATIONS or 10)
    #[arg(short = 'n', long, value_name = "N")]
    max_iterations: Option<usize>,

    /// Ollama model (default: TOOLLOOP_MODEL, else per strategy)
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    /// Ollama base URL (default: OLLAMA_HOST or http://localhost:11434)
    #[arg(long, value_name = "URL")]
    host: Option<String>,

    /// Replay a scripted conversation instead of calling a model
    #[arg(long)]
    mock: bool,

    /// Question (default: the laptop gold-discount question)
    #[arg(trailing_var_arg = true)]
    question: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = config::load_and_apply("toolloop", None);
    cli::logging::init("toolloop")?;
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "config not loaded");
    }

    let args = Args::parse();
    let mut settings = AgentSettings::from_env();
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }
    if let Some(n) = args.max_iterations {
        settings.max_iterations = n;
    }
    if let Some(model) = args.model {
        settings.model = Some(model);
    }
    if let Some(host) = args.host {
        settings.ollama_host = host;
    }

    let mut opts = DemoOptions::from_settings(&settings);
    if !args.question.is_empty() {
        opts.question = args.question.join(" ");
    }

    let out = Arc::new(Mutex::new(std::io::stdout()));
    if args.mock {
        run_demo(demo_script(opts.strategy), &opts, out).await?;
    } else {
        tracing::info!(host = %settings.ollama_host, model = settings.model(), "using Ollama");
        run_demo(settings.ollama_chat(), &opts, out).await?;
    }
    Ok(())
}
