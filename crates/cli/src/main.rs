mod config_commands;

use {
    clap::{Parser, Subcommand},
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
    village_config::{Severity, VillageConfig},
};

#[derive(Parser)]
#[command(name = "village", about = "Village check-in dashboard backend", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config and PORT).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Explicit config file instead of the standard search locations.
    #[arg(long, global = true, env = "VILLAGE_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server (default when no subcommand is provided).
    Serve,
    /// Validate the configuration and report errors/warnings.
    CheckConfig,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Defaults, then config file, then environment, then CLI flags.
fn load_config(cli: &Cli) -> anyhow::Result<VillageConfig> {
    let mut config = match cli.config {
        Some(ref path) => {
            let mut config = village_config::load_config(path)?;
            village_config::apply_env_overrides(&mut config);
            config
        },
        None => village_config::discover_and_load(),
    };
    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    let config = load_config(&cli)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            info!(version = env!("CARGO_PKG_VERSION"), "village starting");

            let result = village_config::validate(&config);
            for d in &result.diagnostics {
                match d.severity {
                    Severity::Warning => warn!(path = d.path, "{}", d.message),
                    Severity::Error => error!(path = d.path, "{}", d.message),
                }
            }
            if result.has_errors() {
                anyhow::bail!(
                    "refusing to start: configuration has {} error(s)",
                    result.count(Severity::Error)
                );
            }

            village_gateway::server::start_server(config).await
        },
        Some(Commands::CheckConfig) => config_commands::check(&config),
    }
}
