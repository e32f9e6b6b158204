use anyhow::Result;
use butterfly_navigate::engine::demo::DemoEngine;
use butterfly_navigate::{nav, AppState, NavConfig};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "butterfly-navigate")]
#[command(about = "Turn-by-turn navigation API over a routing engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the navigation HTTP server with the built-in demo engine
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Comma-separated road classes or environments to never snap onto
        #[arg(long)]
        snap_prevention: Option<String>,

        /// Locale used when a request names none
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            snap_prevention,
            locale,
        } => {
            let mut config = NavConfig {
                default_locale: locale,
                ..NavConfig::default()
            };
            if let Some(list) = snap_prevention {
                config.snap_preventions = list
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }

            let state = AppState::new(Arc::new(DemoEngine::new()), config)?;
            nav::serve(state, port).await
        }
    }
}
