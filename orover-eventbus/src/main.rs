//! The event bus broker binary (§4.4): binds the producer-facing and
//! consumer-facing endpoints and relays traffic between them until
//! terminated.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orover_core::actor::ActorLock;
use orover_core::config::Config;
use orover_core::logging::{self, Severity};
use orover_core::broker::EventBusProxy;
use tracing::{error, info};

/// `<binary> [--config PATH]`, per §6's supervisor CLI contract (every
/// process launched by the supervisor shares this shape).
#[derive(Parser)]
struct Cli {
    /// Path to the sectioned configuration file; defaults to `config.ini`
    /// in the working directory (§4.3).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config);

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let name = config.derive_actor_name("eventbus.py");
    let loglevel = Severity::from_config_value(&config.get_string("orover", "loglevel", "INFO"));
    logging::install_actor_logging(
        name.clone(),
        format!("127.0.0.1:{}", logging::DEFAULT_LOG_PORT),
        loglevel,
    );

    let _lock = match ActorLock::acquire(&std::env::temp_dir(), &name) {
        Ok(lock) => lock,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let xsub_endpoint = config.get_string("eventbus", "bus_xsub_socket", "tcp://*:5556");
    let xpub_endpoint = config.get_string("eventbus", "bus_xpub_socket", "tcp://*:5555");

    let proxy = match EventBusProxy::new(&xsub_endpoint, &xpub_endpoint) {
        Ok(proxy) => proxy,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(%xsub_endpoint, %xpub_endpoint, "event bus starting");

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
        result = proxy.run() => {
            if let Err(e) = result {
                error!(error = %e, "event bus exited");
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
