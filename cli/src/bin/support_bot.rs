//! `support-bot` binary: interactive questions against the hosted knowledge base.

use clap::Parser;
use cli::run_support_loop;
use toolloop::QnaSettings;

#[derive(Parser, Debug)]
#[command(name = "support-bot")]
#[command(about = "Ask the support knowledge base; type exit or quit to leave")]
struct Args {
    /// Knowledge-base query URL (default: QNA_ENDPOINT or the production deployment)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = config::load_and_apply("toolloop", None);
    cli::logging::init("support-bot")?;
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "config not loaded");
    }

    let args = Args::parse();
    let mut settings = QnaSettings::from_env();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if settings.api_key.is_none() {
        tracing::warn!("LANGUAGE_QNA_KEY is not set; every question will fail");
    }

    let client = settings.client();
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_support_loop(&client, input, &mut stdout).await?;
    Ok(())
}
