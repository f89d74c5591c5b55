//! The log collection server binary (§4.7): a TCP listener accepting
//! framed, serialized log records from every other process and writing
//! them to a rotated file.
//!
//! Deliberately does not build on [`orover_core::actor::ActorRuntime`]: the
//! log server sits below the actor framework and must never connect to the
//! bus (§4.6 "the log server must not connect to the bus"), whereas
//! `ActorRuntime::initialize` unconditionally connects both bus sockets.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orover_core::actor::ActorLock;
use orover_core::config::Config;
use orover_core::logging::{self, LogServer};
use tracing::{error, info};
use tracing_subscriber::fmt;

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
    // Plain stdout logging only: the log server cannot forward its own
    // records through itself, and must not touch the bus.
    fmt().init();

    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config);

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let name = config.derive_actor_name("logserver.py");
    let _lock = match ActorLock::acquire(&std::env::temp_dir(), &name) {
        Ok(lock) => lock,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let logfile = config.get_string("orover", "logfile", "orover.log");
    let datefmt = config.get_string("orover", "logdatefmt", "%Y-%m-%d %H:%M:%S");
    let bind_addr = format!("0.0.0.0:{}", logging::DEFAULT_LOG_PORT);

    let server = match LogServer::new(&logfile, &datefmt).bind(&bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(%bind_addr, %logfile, "log server listening");

    #[cfg(unix)]
    let mut sigterm =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                eprintln!("failed to install SIGTERM handler: {e}");
                return ExitCode::FAILURE;
            }
        };

    tokio::select! {
        result = server.serve() => {
            if let Err(e) = result {
                error!(error = %e, "log server exited");
                return ExitCode::FAILURE;
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
        #[cfg(unix)]
        _ = sigterm.recv() => {
            info!("termination signal received, shutting down");
        }
    }

    ExitCode::SUCCESS
}
