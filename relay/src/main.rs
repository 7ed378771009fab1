#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Read;

use args::Args;
use clap::Parser;
use relay_config::RelayConfig;
use relay_llm::{FailoverOrchestrator, RelayError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    let mut config = RelayConfig::load(&args.config)?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.request.timeout_ms = timeout_ms;
    }

    tracing::info!(
        config_path = %args.config.display(),
        providers = config.providers.len(),
        "starting relay"
    );

    let relay = FailoverOrchestrator::from_config(&config)?;

    let prompt = match args.prompt {
        Some(prompt) => prompt,
        None => read_prompt_from_stdin()?,
    };

    match relay.complete(&prompt).await {
        Ok(text) => {
            // Trimming is presentation only; the core returns text as-is
            println!("{}", text.trim());
            Ok(())
        }
        Err(RelayError::AllProvidersExhausted { attempts }) => {
            for attempt in &attempts {
                tracing::error!(%attempt, "backend attempt failed");
            }
            anyhow::bail!("all providers exhausted after {} attempt(s)", attempts.len())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Read the prompt from stdin when no argument was given
fn read_prompt_from_stdin() -> anyhow::Result<String> {
    let mut prompt = String::new();
    std::io::stdin().read_to_string(&mut prompt)?;
    if prompt.trim().is_empty() {
        anyhow::bail!("prompt is empty; pass it as an argument or on stdin");
    }
    Ok(prompt)
}
