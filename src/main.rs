use clap::Parser;
use github_account_gateway::{config::ConfigLoader, error::AppError, server::run_server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "github-account-gateway")]
#[command(about = "HTTP gateway for GitHub account operations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub enum Cli {
    /// Start the HTTP server (requires GITHUB_TOKEN)
    Server {
        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<String>,
        /// Host to bind to (overrides config)
        #[arg(long, env = "SERVER_HOST")]
        host: Option<String>,
        /// Port to bind to (overrides config)
        #[arg(long, env = "SERVER_PORT")]
        port: Option<u16>,
        /// GitHub API base URL (overrides config)
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("github_account_gateway=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli {
        Cli::Server {
            config,
            host,
            port,
            api_url,
        } => {
            info!("Starting GitHub account gateway");
            handle_server_command(config, host, port, api_url).await
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Handle server command with CLI overrides applied on top of the config file
async fn handle_server_command(
    config_path: Option<String>,
    host_override: Option<String>,
    port_override: Option<u16>,
    api_url_override: Option<String>,
) -> Result<(), AppError> {
    let mut config = ConfigLoader::load(config_path.as_deref())?;

    if let Some(host) = host_override {
        config.server.host = host;
    }

    if let Some(port) = port_override {
        config.server.port = port;
    }

    if let Some(api_url) = api_url_override {
        config.github.api_url = api_url;
    }

    run_server(config).await
}
