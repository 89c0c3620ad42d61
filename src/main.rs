mod api;
mod app;
mod config;
mod event;
mod query;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tdo")]
#[command(about = "A terminal UI for a todo list service")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/tdo/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the todo service (overrides config)
  #[arg(short, long)]
  url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // The TUI owns the terminal, so logs go to a file
  let _log_guard = init_tracing()?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  // Override server URL if specified on command line
  let config = if let Some(url) = args.url {
    config::Config {
      server: config::ServerConfig { url },
      ..config
    }
  } else {
    config
  };

  // Initialize and run the app
  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}

fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  use tracing_subscriber::EnvFilter;

  let log_dir = dirs::state_dir()
    .or_else(dirs::cache_dir)
    .map(|d| d.join("tdo"))
    .ok_or_else(|| eyre!("Could not determine state directory for logs"))?;
  std::fs::create_dir_all(&log_dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", log_dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(log_dir, "tdo.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tdo=info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}
