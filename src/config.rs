use anyhow::{bail, Result};
use std::path::PathBuf;

/// The locale this site serves. The site is German-only.
pub const LOCALE: &str = "de";

/// Time zone handed to the view layer alongside the messages.
pub const TIME_ZONE: &str = "Europe/Berlin";

/// Default endpoint for published translation documents.
pub const DEFAULT_REMOTE_BASE_URL: &str =
    "https://marketingsite.blob.core.windows.net/translations";

const DEFAULT_SITE_BASE_URL: &str = "http://localhost:3000";

/// Runtime mode, resolved once at startup.
///
/// Production pulls translations from the published blob store so copy
/// updates go live without a redeploy; every other mode reads the files
/// checked into the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

/// Where this process renders.
///
/// Server processes read locale files from disk. Client bundles cannot, so
/// they fetch the same files from the site origin like any other static
/// asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Server,
    Client,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub execution_context: ExecutionContext,

    // Remote store (production)
    pub remote_base_url: String,

    // Local files
    pub app_root: PathBuf,
    pub site_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Anything other than "production" (development, test, unset) uses
        // the local files, matching how the site itself decides.
        let environment = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let execution_context = match std::env::var("RENDER_CONTEXT").as_deref() {
            Ok("client") => ExecutionContext::Client,
            _ => ExecutionContext::Server,
        };

        let remote_base_url = std::env::var("TRANSLATIONS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_REMOTE_BASE_URL.to_string());
        if remote_base_url.trim().is_empty() {
            bail!("TRANSLATIONS_BASE_URL is set but empty");
        }

        let site_base_url = std::env::var("SITE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_BASE_URL.to_string());
        if site_base_url.trim().is_empty() {
            bail!("SITE_BASE_URL is set but empty");
        }

        Ok(Self {
            environment,
            execution_context,
            // Trailing slashes would produce double slashes when joining
            remote_base_url: remote_base_url.trim_end_matches('/').to_string(),
            app_root: std::env::var("APP_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            site_base_url: site_base_url.trim_end_matches('/').to_string(),
        })
    }
}
