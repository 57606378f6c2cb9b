use anyhow::Context;
use clap::Parser;
use cora_identity::{IdentityClient, IdentityOptions};
use cora_server::config::DEFAULT_CONFIG_PATH;
use cora_server::telemetry::init_telemetry;
use cora_server::{router, AppState, Config};
use cora_timetable::SqliteTimetable;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "coraserver", version, about = "Campus timetable service with Microsoft sign-in")]
struct Cli {
    /// OAuth client configuration (JSON).
    #[arg(long, env = "CORA_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(long, env = "CORA_LISTEN", default_value = "0.0.0.0:42069")]
    listen: SocketAddr,

    /// SQLite URL of the timetable database.
    #[arg(long, env = "CORA_DATABASE", default_value = "sqlite://timetable.db")]
    database: String,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    json_logs: bool,

    /// Upper bound on each call to the identity provider.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    upstream_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_telemetry(&cli.log_level, cli.json_logs);

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;

    let options = IdentityOptions {
        timeout: Duration::from_secs(cli.upstream_timeout_secs),
        validate_state: config.validate_state,
        ..IdentityOptions::default()
    };
    let identity =
        IdentityClient::new(&config.oauth, options).context("Invalid OAuth configuration")?;
    let store = SqliteTimetable::connect(&cli.database)
        .await
        .with_context(|| format!("Error opening timetable database {}", cli.database))?;

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Error binding {}", cli.listen))?;
    info!(addr = %cli.listen, version = env!("CARGO_PKG_VERSION"), "Server starting");

    axum::serve(listener, router(AppState::new(identity, store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn zero_upstream_timeout_is_rejected() {
        let result = Cli::try_parse_from(["coraserver", "--upstream-timeout-secs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn upstream_timeout_defaults_to_twenty_seconds() {
        let cli = Cli::try_parse_from(["coraserver"]).expect("defaults parse");
        assert_eq!(cli.upstream_timeout_secs, 20);
    }
}
