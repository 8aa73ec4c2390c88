//! Translation loading for the German marketing site.
//!
//! The site renders every page in German from namespaced JSON documents.
//! This crate owns the loading side: picking the right source for the
//! running environment (bundled files in development, the published blob
//! store in production with the bundled files as fallback), caching loaded
//! namespaces for the process lifetime, and shaping merged messages for the
//! view layer. Loading never fails a page render; broken sources degrade to
//! empty resources with their reason recorded.
//!
//! # Example
//!
//! ```rust,ignore
//! use site_translations::{Config, Namespace, TranslationCache, TranslationLoader};
//!
//! let config = Config::from_env()?;
//! let cache = TranslationCache::new();
//! let loader = TranslationLoader::new(&config, reqwest::Client::new(), cache);
//!
//! let props = loader
//!     .page_props(&[Namespace::Common, Namespace::Products])
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&props)?);
//! ```

pub mod cache;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod namespace;
pub mod resource;
pub mod source;
pub mod validator;

pub use cache::TranslationCache;
pub use config::{Config, Environment, ExecutionContext, LOCALE, TIME_ZONE};
pub use loader::{LoadedNamespace, PageTranslations, Provenance, TranslationLoader};
pub use metrics::{LoaderMetrics, MetricsSnapshot};
pub use namespace::Namespace;
pub use resource::{TranslationResource, TranslationValue};
pub use source::{FailureKind, LocalSource, RemoteSource, SourceError};
pub use validator::{ResourceValidator, ValidationReport};
