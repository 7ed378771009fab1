use std::path::PathBuf;

use clap::Parser;

/// Prompt relay CLI
#[derive(Debug, Parser)]
#[command(name = "relay", about = "Multi-provider LLM completion router with failover")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml", env = "RELAY_CONFIG")]
    pub config: PathBuf,

    /// Override the per-attempt timeout in milliseconds
    #[arg(long, env = "RELAY_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Prompt text; read from stdin when omitted
    pub prompt: Option<String>,
}
