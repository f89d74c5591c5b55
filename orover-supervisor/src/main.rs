//! The oRover supervisor binary: starts every configured process and, on
//! receiving a termination signal, shuts them down in reverse start order.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orover_core::config::Config;
use orover_supervisor::Supervisor;
use tracing::info;

/// `<binary> [--config PATH]`, per §6's supervisor CLI contract.
#[derive(Parser)]
struct Cli {
    /// Path to the sectioned configuration file; defaults to `config.ini`
    /// in the working directory (§4.3).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config);

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let python_exec = config.get_string("orover", "python_exec", "python3");
    let config_path_str = config_path.to_string_lossy().to_string();

    let supervisor = match Supervisor::start(&config, &python_exec, &config_path_str) {
        Ok(supervisor) => supervisor,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        children = ?supervisor.child_names(),
        "-------------------- Starting oRover --------------------"
    );

    #[cfg(unix)]
    let mut sigterm =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                eprintln!("failed to install SIGTERM handler: {e}");
                supervisor.shutdown().await;
                return ExitCode::FAILURE;
            }
        };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
        #[cfg(unix)]
        _ = sigterm.recv() => {
            info!("termination signal received, shutting down");
        }
    }

    supervisor.shutdown().await;
    ExitCode::SUCCESS
}
