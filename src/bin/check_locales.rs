//! Checks the bundled locale files before they ship.
//!
//! Usage:
//!   cargo run --bin check-locales            # validate public/locales/de
//!   APP_ROOT=/srv/site cargo run --bin check-locales
//!
//! Reads every namespace document from disk, runs the content validator
//! over each, and exits non-zero when a document is missing, malformed or
//! validates with errors. Warnings are logged but do not fail the run, so
//! CI can gate merges on it without blocking copy drafts.

use anyhow::Result;
use site_translations::{Config, ExecutionContext, LocalSource, Namespace, ResourceValidator};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_translations=info".parse()?),
        )
        .init();

    let mut config = Config::from_env()?;
    // This tool always reads the files directly, whatever the process env says
    config.execution_context = ExecutionContext::Server;

    info!(
        "Checking locale files under {}/public/locales/de",
        config.app_root.display()
    );

    let source = LocalSource::new(&config, reqwest::Client::new());
    let mut failed = false;

    for namespace in Namespace::ALL {
        match source.load(namespace).await {
            Ok(resource) => {
                let report = ResourceValidator::validate(&resource);
                for warning in &report.warnings {
                    warn!("{}: {}", namespace, warning);
                }
                for err in &report.errors {
                    error!("{}: {}", namespace, err);
                }

                if report.has_errors() {
                    failed = true;
                } else {
                    info!("✓ {} ({} keys)", namespace, resource.flatten().len());
                }
            }
            Err(e) => {
                error!("✗ {}: {}", namespace, e);
                failed = true;
            }
        }
    }

    if failed {
        error!("Locale check failed");
        std::process::exit(1);
    }

    info!("All locale files are valid");
    Ok(())
}
