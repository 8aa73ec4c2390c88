//! Prints the merged translation messages exactly as the site's request
//! hook would receive them, then a summary of where each namespace came
//! from.
//!
//! Usage:
//!   cargo run                              # bundled files (development)
//!   APP_ENV=production cargo run           # remote store with fallback
//!
//! Optional environment variables:
//! - APP_ENV (production switches to the remote store)
//! - RENDER_CONTEXT (client fetches bundled files over HTTP)
//! - TRANSLATIONS_BASE_URL (remote store override)
//! - APP_ROOT (directory containing public/locales, defaults to .)
//! - SITE_BASE_URL (site origin for client context)

use anyhow::Result;
use site_translations::{Config, Namespace, TranslationCache, TranslationLoader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_translations=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Loading translations ({:?} environment, {:?} context)",
        config.environment, config.execution_context
    );

    let cache = TranslationCache::new();
    let loader = TranslationLoader::new(&config, reqwest::Client::new(), cache);

    // Load every namespace the way the request hook does
    let mut degraded = Vec::new();
    for namespace in Namespace::ALL {
        let loaded = loader.load_one(namespace).await;
        if loaded.provenance.is_degraded() {
            degraded.push(namespace);
        }
    }

    let props = loader.page_props(&Namespace::ALL).await;
    println!("{}", serde_json::to_string_pretty(&props)?);

    let metrics = loader.metrics();
    info!(
        "Done: {} remote fetches ({} failed), {} local loads ({} failed), {} fallbacks",
        metrics.remote_fetches,
        metrics.remote_failures,
        metrics.local_loads,
        metrics.local_failures,
        metrics.fallbacks
    );

    if !degraded.is_empty() {
        let names: Vec<&str> = degraded.iter().map(|ns| ns.as_str()).collect();
        info!(
            "⚠️  {} namespace(s) degraded to empty: {}",
            degraded.len(),
            names.join(", ")
        );
    }

    Ok(())
}
