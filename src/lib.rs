pub mod api;
pub mod config;
pub mod core_state;
pub mod form;
pub mod models;
pub mod pipeline;
pub mod render;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::Settings;
use crate::core_state::CoreState;
use crate::pipeline::analysis::{ClaimAnalyzer, GeminiClient};

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?settings, "Settings loaded");

    // The blocking HTTP client must be created and dropped outside the
    // async runtime.
    let client = match GeminiClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot build reasoning client: {e}");
            std::process::exit(1);
        }
    };
    let credential_configured = client.has_credential();
    if !credential_configured {
        tracing::warn!("GEMINI_API_KEY is not set; every analysis will fail");
    }
    let analyzer = Arc::new(ClaimAnalyzer::new(Box::new(client)));
    tracing::info!(model = analyzer.model(), "Reasoning client ready");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Cannot start async runtime: {e}");
            std::process::exit(1);
        }
    };

    let core = Arc::new(CoreState::new(Arc::clone(&analyzer), credential_configured));
    let outcome = runtime.block_on(serve(core, settings.bind_addr));
    drop(runtime);
    drop(analyzer);

    if let Err(e) = outcome {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Serve until Ctrl-C, then drain in-flight requests.
async fn serve(core: Arc<CoreState>, addr: SocketAddr) -> Result<(), ServerError> {
    let mut server = api::start_server(core, addr).await?;
    tracing::info!("Listening on http://{}", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
