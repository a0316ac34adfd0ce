mod cli;
mod commands;
mod config;

use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let invocation = cli::parse_args(&args)?;
    match invocation.command {
        cli::Command::Help => {
            cli::print_help();
            Ok(())
        }
        command => {
            let config = config::ProjectConfig::resolve(&invocation.global)?;
            commands::run(&config, command).await
        }
    }
}
