mod config;
mod errors;
mod generation;
mod humanizer;
mod llm_client;
mod routes;
mod scheduler;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::content::{ContentGenerator, OpenAiGenerator};
use crate::humanizer::HumanizerClient;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::scheduler::{Scheduler, TickContext};
use crate::state::AppState;
use crate::store::blogs::BlogStore;
use crate::store::keywords::KeywordStore;
use crate::store::leads::LeadStore;
use crate::store::settings::SettingsStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting admin API v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", config.data_dir.display());

    // Flat-file stores
    let settings = SettingsStore::new(&config.data_dir, config.overrides.clone());
    let keywords = KeywordStore::new(&config.data_dir);
    let blogs = BlogStore::new(&config.data_dir);
    let leads = LeadStore::new(&config.data_dir);

    // Content pipeline
    let llm = OpenAiClient::new(settings.clone());
    info!("OpenAI client initialized (model: {})", llm_client::MODEL);
    let generator: Arc<dyn ContentGenerator> = Arc::new(OpenAiGenerator::new(llm, settings.clone()));
    let humanizer = HumanizerClient::new(settings.clone());

    // Scheduler, started only if auto-posting is on
    let scheduler = Scheduler::new(TickContext {
        settings: settings.clone(),
        keywords: keywords.clone(),
        blogs: blogs.clone(),
        generator: generator.clone(),
        humanizer: humanizer.clone(),
    });
    let effective = settings.effective().await;
    if effective.auto_post_enabled {
        scheduler.start(effective.post_interval_minutes).await;
    } else {
        info!("Auto-posting is disabled");
    }

    let state = AppState {
        settings,
        keywords,
        blogs,
        leads,
        generator,
        humanizer,
        scheduler,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the configured dashboard origins when any are set;
/// an unconfigured deployment stays permissive for local development.
fn build_cors(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = [&config.frontend_url, &config.admin_url]
        .into_iter()
        .flatten()
        .filter_map(|url| url.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
