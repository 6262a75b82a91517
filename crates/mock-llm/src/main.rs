use anyhow::Context;
use clap::Parser;
use mock_llm::{Config, MockLlmServer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mock-llm", version, about = "Mock server for LLM provider APIs")]
struct Args {
    /// Mock configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, env = "MOCK_LLM_CONFIG")]
    config: PathBuf,

    /// Override the listen address from the config file
    #[arg(short, long, env = "MOCK_LLM_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(addr) = args.listen_addr {
        config.listen_addr = addr;
        config.validate()?;
    }

    info!(
        openai = config.openai.len(),
        anthropic = config.anthropic.len(),
        google = config.google.len(),
        "Loaded mocks from {}",
        args.config.display()
    );

    let server = MockLlmServer::new(config);
    let base_url = server.start().await?;
    println!("{base_url}");

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    server.stop().await;
    Ok(())
}
