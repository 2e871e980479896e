//! Chat relay server binary.
//!
//! Serves `POST /functions/v1/chat` plus the health and catalog routes.
//! Prints `{"port": N}` to stdout once bound so a parent process can discover
//! an ephemeral port.

use clap::Parser;
use contest_api::config::ApiConfig;
use tracing::{info, warn};

/// CLI arguments for the relay server. Anything not given on the command line
/// comes from the environment (see [`ApiConfig::from_env`]).
#[derive(Parser, Debug)]
#[command(name = "contest_api_server", about = "Ticket contest chat relay server")]
struct Args {
    /// Address to listen on (port 0 = ephemeral). Env: `BIND_ADDR`.
    #[arg(long)]
    bind: Option<String>,

    /// API key for the upstream chat completion service. Env: `OPENAI_API_KEY`.
    #[arg(long)]
    openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible upstream. Env: `OPENAI_BASE_URL`.
    #[arg(long)]
    openai_base_url: Option<String>,

    /// Chat completion model. Env: `OPENAI_MODEL`.
    #[arg(long)]
    openai_model: Option<String>,
}

impl Args {
    /// Overlay the flags that were given onto `base`.
    fn apply(self, base: ApiConfig) -> ApiConfig {
        ApiConfig {
            bind_addr: self.bind.unwrap_or(base.bind_addr),
            openai_api_key: self
                .openai_api_key
                .filter(|k| !k.is_empty())
                .or(base.openai_api_key),
            openai_base_url: self.openai_base_url.unwrap_or(base.openai_base_url),
            openai_model: self.openai_model.unwrap_or(base.openai_model),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Write logs to stderr so stdout is reserved for the JSON port message.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,contest_api=debug,contest_core=debug")
            }),
        )
        .init();

    let config = Args::parse().apply(ApiConfig::from_env());

    info!(
        bind = %config.bind_addr,
        upstream = %config.openai_base_url,
        model = %config.openai_model,
        "starting contest_api_server"
    );
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail with 500");
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    let app = contest_api::router(contest_api::AppState::from_config(config));

    println!("{}", serde_json::json!({"port": local_addr.port()}));
    info!(addr = %local_addr, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
            info!("shutting down");
        })
        .await?;

    Ok(())
}
