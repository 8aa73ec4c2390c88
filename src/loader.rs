//! Translation loading.
//!
//! The loader ties the pieces together: it picks the source strategy for the
//! configured environment once at construction, answers repeat loads from the
//! shared cache, falls back from the remote store to the bundled files in
//! production, and absorbs every failure into an empty resource so a page
//! render never dies over missing copy.

use crate::cache::TranslationCache;
use crate::config::{Config, Environment, LOCALE, TIME_ZONE};
use crate::metrics::{LoaderMetrics, MetricsSnapshot};
use crate::namespace::Namespace;
use crate::resource::{TranslationResource, TranslationValue};
use crate::source::{FailureKind, LocalSource, RemoteSource};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Where a loaded resource actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Fetched from the remote store (production happy path)
    Remote,
    /// Loaded from the application's own files (development happy path)
    Local,
    /// The remote fetch failed and the bundled copy stood in
    FallbackLocal { remote_failure: FailureKind },
    /// Every source failed; the resource is empty so the page still renders
    Degraded { failure: FailureKind },
}

impl Provenance {
    /// True when the resource is an empty stand-in, not real content.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Provenance::Degraded { .. })
    }

    /// True when the content is real but the remote store was unavailable.
    pub fn used_fallback(&self) -> bool {
        matches!(self, Provenance::FallbackLocal { .. })
    }
}

/// One namespace's load result.
///
/// Loading is infallible by design: failures surface as an empty resource
/// with the reason recorded in `provenance`, never as an error the page
/// would have to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedNamespace {
    pub namespace: Namespace,
    pub resource: TranslationResource,
    pub provenance: Provenance,
}

/// Messages plus locale metadata, shaped for the view layer's i18n provider.
#[derive(Debug, Clone, Serialize)]
pub struct PageTranslations {
    pub messages: TranslationResource,
    pub locale: &'static str,
    #[serde(rename = "timeZone")]
    pub time_zone: &'static str,
}

/// Source strategy, fixed at construction for the loader's lifetime.
enum SourceStrategy {
    /// Local files only
    Local(LocalSource),
    /// Remote store first, bundled files as fallback
    Remote {
        remote: RemoteSource,
        fallback: LocalSource,
    },
}

/// Loads, caches and merges translation namespaces.
pub struct TranslationLoader {
    strategy: SourceStrategy,
    cache: TranslationCache,
    metrics: LoaderMetrics,
}

impl TranslationLoader {
    /// Build a loader for the given configuration.
    ///
    /// # Arguments
    /// * `config` - Decides the source strategy: production fetches from the
    ///   remote store with the bundled files as fallback, everything else
    ///   reads the bundled files directly
    /// * `client` - HTTP client used for all fetches; timeouts are whatever
    ///   the caller configured on it
    /// * `cache` - Cache handle; loaders given the same handle share results
    pub fn new(config: &Config, client: reqwest::Client, cache: TranslationCache) -> Self {
        let local = LocalSource::new(config, client.clone());
        let strategy = match config.environment {
            Environment::Production => SourceStrategy::Remote {
                remote: RemoteSource::new(config, client),
                fallback: local,
            },
            Environment::Development => SourceStrategy::Local(local),
        };

        Self {
            strategy,
            cache,
            metrics: LoaderMetrics::new(),
        }
    }

    /// Load a single namespace, consulting the cache first.
    ///
    /// Never fails: when every source is exhausted the result carries an
    /// empty resource with `Provenance::Degraded`. Degraded results are
    /// cached like any other, so a broken source is not hammered on every
    /// render; [`clear_cache`](Self::clear_cache) gives it another chance.
    pub async fn load_one(&self, namespace: Namespace) -> LoadedNamespace {
        if let Some(cached) = self.cache.get(namespace) {
            self.metrics.record_cache_hit();
            debug!("Cache hit for namespace '{}'", namespace);
            return cached;
        }
        self.metrics.record_cache_miss();

        let loaded = self.resolve(namespace).await;
        // Concurrent misses for the same namespace both reach this insert;
        // last write wins and the entries are equivalent.
        self.cache.insert(loaded.clone());
        loaded
    }

    async fn resolve(&self, namespace: Namespace) -> LoadedNamespace {
        match &self.strategy {
            SourceStrategy::Local(local) => {
                self.metrics.record_local_load();
                match local.load(namespace).await {
                    Ok(resource) => {
                        info!("Loaded namespace '{}' from local files", namespace);
                        LoadedNamespace {
                            namespace,
                            resource,
                            provenance: Provenance::Local,
                        }
                    }
                    Err(e) => {
                        self.metrics.record_local_failure();
                        error!(
                            "Failed to load namespace '{}' locally, serving empty resource: {}",
                            namespace, e
                        );
                        LoadedNamespace {
                            namespace,
                            resource: TranslationResource::new(),
                            provenance: Provenance::Degraded { failure: e.kind() },
                        }
                    }
                }
            }
            SourceStrategy::Remote { remote, fallback } => {
                self.metrics.record_remote_fetch();
                match remote.load(namespace).await {
                    Ok(resource) => {
                        info!("Loaded namespace '{}' from remote store", namespace);
                        LoadedNamespace {
                            namespace,
                            resource,
                            provenance: Provenance::Remote,
                        }
                    }
                    Err(remote_err) => {
                        self.metrics.record_remote_failure();
                        self.metrics.record_fallback();
                        warn!(
                            "Remote fetch for namespace '{}' failed, falling back to bundled files: {}",
                            namespace, remote_err
                        );

                        self.metrics.record_local_load();
                        match fallback.load(namespace).await {
                            Ok(resource) => LoadedNamespace {
                                namespace,
                                resource,
                                provenance: Provenance::FallbackLocal {
                                    remote_failure: remote_err.kind(),
                                },
                            },
                            Err(local_err) => {
                                self.metrics.record_local_failure();
                                error!(
                                    "Fallback for namespace '{}' also failed, serving empty resource: {}",
                                    namespace, local_err
                                );
                                LoadedNamespace {
                                    namespace,
                                    resource: TranslationResource::new(),
                                    provenance: Provenance::Degraded {
                                        failure: local_err.kind(),
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Load several namespaces concurrently and merge them into one resource,
    /// each namespace's content nested under its own key.
    ///
    /// Duplicate namespaces in the list are harmless: the merged entry is
    /// written once per occurrence with equivalent content.
    pub async fn load_many(&self, namespaces: &[Namespace]) -> TranslationResource {
        let loads = join_all(namespaces.iter().map(|ns| self.load_one(*ns))).await;

        let mut merged = TranslationResource::new();
        for loaded in loads {
            merged.insert(
                loaded.namespace.as_str(),
                TranslationValue::Nested(loaded.resource),
            );
        }
        merged
    }

    /// Messages for a page plus the locale metadata its i18n provider needs.
    pub async fn page_props(&self, namespaces: &[Namespace]) -> PageTranslations {
        PageTranslations {
            messages: self.load_many(namespaces).await,
            locale: LOCALE,
            time_zone: TIME_ZONE,
        }
    }

    /// The full message set for the request-level i18n configuration.
    pub async fn request_config(&self) -> TranslationResource {
        self.load_many(&Namespace::ALL).await
    }

    /// Drop every cached namespace so the next loads hit their sources.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Translation cache cleared");
    }

    /// Snapshot of this loader's counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionContext;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_locale_file(root: &TempDir, namespace: &str, content: serde_json::Value) {
        let dir = root.path().join("public").join("locales").join("de");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(format!("{}.json", namespace)),
            content.to_string(),
        )
        .unwrap();
    }

    fn development_config(root: &TempDir) -> Config {
        Config {
            environment: Environment::Development,
            execution_context: ExecutionContext::Server,
            remote_base_url: "http://unused.invalid".to_string(),
            app_root: root.path().to_path_buf(),
            site_base_url: "http://unused.invalid".to_string(),
        }
    }

    fn development_loader(root: &TempDir) -> TranslationLoader {
        TranslationLoader::new(
            &development_config(root),
            reqwest::Client::new(),
            TranslationCache::new(),
        )
    }

    // ==================== Provenance Tests ====================

    #[test]
    fn test_provenance_classification() {
        assert!(!Provenance::Remote.is_degraded());
        assert!(!Provenance::Local.is_degraded());
        assert!(Provenance::Degraded {
            failure: FailureKind::Transport
        }
        .is_degraded());

        assert!(Provenance::FallbackLocal {
            remote_failure: FailureKind::Status(500)
        }
        .used_fallback());
        assert!(!Provenance::Remote.used_fallback());
    }

    // ==================== load_one Tests ====================

    #[tokio::test]
    async fn test_load_one_reads_local_files_in_development() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "common", json!({ "loading": "Wird geladen..." }));

        let loader = development_loader(&root);
        let loaded = loader.load_one(Namespace::Common).await;

        assert_eq!(loaded.namespace, Namespace::Common);
        assert_eq!(loaded.provenance, Provenance::Local);
        assert_eq!(loaded.resource.lookup("loading"), Some("Wird geladen..."));
    }

    #[tokio::test]
    async fn test_load_one_missing_file_degrades_to_empty() {
        let root = TempDir::new().unwrap();

        let loader = development_loader(&root);
        let loaded = loader.load_one(Namespace::Forms).await;

        assert!(loaded.resource.is_empty());
        assert_eq!(
            loaded.provenance,
            Provenance::Degraded {
                failure: FailureKind::Unreadable
            }
        );

        let metrics = loader.metrics();
        assert_eq!(metrics.local_loads, 1);
        assert_eq!(metrics.local_failures, 1);
    }

    #[tokio::test]
    async fn test_load_one_serves_repeat_loads_from_cache() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "navigation", json!({ "home": "Startseite" }));

        let loader = development_loader(&root);
        let first = loader.load_one(Namespace::Navigation).await;
        let second = loader.load_one(Namespace::Navigation).await;

        assert_eq!(first, second);
        let metrics = loader.metrics();
        assert_eq!(metrics.local_loads, 1);
        assert_eq!(metrics.cache_misses, 1);
        assert_eq!(metrics.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_degraded_result_stays_cached_until_clear() {
        let root = TempDir::new().unwrap();
        let loader = development_loader(&root);

        let first = loader.load_one(Namespace::Common).await;
        assert!(first.provenance.is_degraded());

        // The file appearing later changes nothing while the entry is cached
        write_locale_file(&root, "common", json!({ "loading": "Wird geladen..." }));
        let second = loader.load_one(Namespace::Common).await;
        assert!(second.provenance.is_degraded());
        assert!(second.resource.is_empty());

        loader.clear_cache();
        let third = loader.load_one(Namespace::Common).await;
        assert_eq!(third.provenance, Provenance::Local);
        assert_eq!(third.resource.lookup("loading"), Some("Wird geladen..."));
    }

    #[tokio::test]
    async fn test_concurrent_loads_of_same_namespace_agree() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "products", json!({ "buyNow": "Jetzt kaufen" }));

        let loader = development_loader(&root);
        let (first, second) = tokio::join!(
            loader.load_one(Namespace::Products),
            loader.load_one(Namespace::Products)
        );

        // Both see the same content whether or not the loads raced
        assert_eq!(first.resource, second.resource);
        let loads = loader.metrics().local_loads;
        assert!(
            (1..=2).contains(&loads),
            "expected 1 or 2 local loads, got {}",
            loads
        );
    }

    // ==================== load_many Tests ====================

    #[tokio::test]
    async fn test_load_many_nests_each_namespace_under_its_key() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "common", json!({ "loading": "Wird geladen..." }));
        write_locale_file(&root, "products", json!({ "buyNow": "Jetzt kaufen" }));

        let loader = development_loader(&root);
        let merged = loader
            .load_many(&[Namespace::Common, Namespace::Products])
            .await;

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.lookup("common.loading"), Some("Wird geladen..."));
        assert_eq!(merged.lookup("products.buyNow"), Some("Jetzt kaufen"));
    }

    #[tokio::test]
    async fn test_load_many_with_empty_list_is_empty() {
        let root = TempDir::new().unwrap();
        let loader = development_loader(&root);

        let merged = loader.load_many(&[]).await;
        assert!(merged.is_empty());
        assert_eq!(loader.metrics().local_loads, 0);
    }

    #[tokio::test]
    async fn test_load_many_tolerates_duplicate_namespaces() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "common", json!({ "loading": "Wird geladen..." }));

        let loader = development_loader(&root);
        let merged = loader
            .load_many(&[Namespace::Common, Namespace::Common])
            .await;

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.lookup("common.loading"), Some("Wird geladen..."));
        let loads = loader.metrics().local_loads;
        assert!(
            (1..=2).contains(&loads),
            "expected 1 or 2 local loads, got {}",
            loads
        );
    }

    #[tokio::test]
    async fn test_load_many_mixes_loaded_and_degraded_namespaces() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "common", json!({ "loading": "Wird geladen..." }));
        // forms.json intentionally absent

        let loader = development_loader(&root);
        let merged = loader
            .load_many(&[Namespace::Common, Namespace::Forms])
            .await;

        assert_eq!(merged.lookup("common.loading"), Some("Wird geladen..."));
        // The degraded namespace is present but empty
        assert!(matches!(
            merged.get("forms"),
            Some(TranslationValue::Nested(nested)) if nested.is_empty()
        ));
    }

    // ==================== Page API Tests ====================

    #[tokio::test]
    async fn test_page_props_carries_locale_metadata() {
        let root = TempDir::new().unwrap();
        write_locale_file(&root, "common", json!({ "backToHome": "Zurück zur Startseite" }));

        let loader = development_loader(&root);
        let props = loader.page_props(&[Namespace::Common]).await;

        assert_eq!(props.locale, "de");
        assert_eq!(props.time_zone, "Europe/Berlin");
        assert_eq!(
            props.messages.lookup("common.backToHome"),
            Some("Zurück zur Startseite")
        );

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["locale"], "de");
        assert_eq!(json["timeZone"], "Europe/Berlin");
        assert_eq!(
            json["messages"]["common"]["backToHome"],
            "Zurück zur Startseite"
        );
    }

    #[tokio::test]
    async fn test_request_config_loads_every_namespace() {
        let root = TempDir::new().unwrap();
        for namespace in Namespace::ALL {
            write_locale_file(&root, namespace.as_str(), json!({ "probe": "Text" }));
        }

        let loader = development_loader(&root);
        let merged = loader.request_config().await;

        assert_eq!(merged.len(), Namespace::ALL.len());
        for namespace in Namespace::ALL {
            assert!(merged.get(namespace.as_str()).is_some());
        }
    }
}
