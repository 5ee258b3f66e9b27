use std::path::Path;
use std::time::{Duration, Instant};

use super::cache::{get_cache_path, load_cache, load_cache_if_fresh, save_cache};
use super::provider::{DEFAULT_CATALOG_URL, fetch_catalog, is_remote};
use super::{Catalog, CatalogError};

const CATALOG_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Where a loaded catalog came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    File(String),
    Remote(String),
    Cache,
    Bundled,
}

impl CatalogOrigin {
    pub fn label(&self) -> String {
        match self {
            CatalogOrigin::File(path) => path.clone(),
            CatalogOrigin::Remote(url) => url.clone(),
            CatalogOrigin::Cache => "cache".to_string(),
            CatalogOrigin::Bundled => "bundled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions<'a> {
    /// Local path or http(s) URL; `None` uses the default registry
    pub source: Option<&'a str>,
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
}

impl LoadedCatalog {
    fn new(catalog: Catalog, origin: CatalogOrigin) -> Self {
        Self { catalog, origin }
    }
}

/// Resolve a catalog.
///
/// An explicit source must succeed. Without one the default registry is
/// tried (fresh cache, network, stale cache) before falling back to the
/// bundled copy, so this only errors when the bundled data is broken.
pub fn load_catalog(options: &LoadOptions<'_>) -> Result<LoadedCatalog, CatalogError> {
    let start = Instant::now();

    let loaded = match options.source {
        Some(source) if is_remote(source) => {
            if options.offline {
                return Err(CatalogError::Offline {
                    source_label: source.to_string(),
                });
            }
            let catalog = fetch_catalog(source)?;
            LoadedCatalog::new(catalog, CatalogOrigin::Remote(source.to_string()))
        }
        Some(path) => {
            let catalog = Catalog::from_path(Path::new(path))?;
            LoadedCatalog::new(catalog, CatalogOrigin::File(path.to_string()))
        }
        None => load_default(options.offline, get_cache_path().as_deref())?,
    };

    if loaded.catalog.models.is_empty() {
        return Err(CatalogError::Empty {
            source_label: loaded.origin.label(),
        });
    }

    tracing::debug!(
        "Loaded {} models from {} ({:.2}ms)",
        loaded.catalog.models.len(),
        loaded.origin.label(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(loaded)
}

fn load_default(offline: bool, cache_path: Option<&Path>) -> Result<LoadedCatalog, CatalogError> {
    let cached = || cache_path.and_then(load_cache);

    if offline {
        if let Some(catalog) = cached() {
            tracing::debug!("Using cached catalog (offline)");
            return Ok(LoadedCatalog::new(catalog, CatalogOrigin::Cache));
        }
        tracing::debug!("No cached catalog, using bundled data");
        return Ok(LoadedCatalog::new(Catalog::bundled()?, CatalogOrigin::Bundled));
    }

    if let Some((catalog, age)) = cache_path.and_then(|p| load_cache_if_fresh(p, CATALOG_CACHE_TTL))
    {
        tracing::debug!("Using cached catalog ({:.1}h old)", age.as_secs_f64() / 3600.0);
        return Ok(LoadedCatalog::new(catalog, CatalogOrigin::Cache));
    }

    match fetch_catalog(DEFAULT_CATALOG_URL) {
        Ok(catalog) if catalog.models.is_empty() => {
            tracing::warn!("Registry returned no models, trying cache");
        }
        Ok(catalog) => {
            if let Some(path) = cache_path {
                save_cache(path, &catalog);
            }
            return Ok(LoadedCatalog::new(
                catalog,
                CatalogOrigin::Remote(DEFAULT_CATALOG_URL.to_string()),
            ));
        }
        Err(e) => tracing::warn!("{e}, trying cache"),
    }

    if let Some(catalog) = cached() {
        tracing::debug!("Using stale cached catalog");
        return Ok(LoadedCatalog::new(catalog, CatalogOrigin::Cache));
    }

    tracing::warn!("No cached catalog, using bundled data");
    Ok(LoadedCatalog::new(Catalog::bundled()?, CatalogOrigin::Bundled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"models": [{{"id": "m1", "pricing": {{"input_1m": 1.0, "output_1m": 2.0}}}}]}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let loaded = load_catalog(&LoadOptions {
            source: Some(&path),
            offline: true,
        })
        .unwrap();
        assert_eq!(loaded.catalog.models.len(), 1);
        assert_eq!(loaded.origin, CatalogOrigin::File(path));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_catalog(&LoadOptions {
            source: Some("/definitely/not/here/llm-pricing.json"),
            offline: true,
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn remote_source_refused_offline() {
        let err = load_catalog(&LoadOptions {
            source: Some("https://example.com/llm-pricing.json"),
            offline: true,
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Offline { .. }));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"models": []}}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let err = load_catalog(&LoadOptions {
            source: Some(&path),
            offline: true,
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Empty { .. }));
    }

    #[test]
    fn offline_skips_empty_cache_for_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("llm-pricing.json");
        std::fs::write(&cache, r#"{"models": []}"#).unwrap();

        let loaded = load_default(true, Some(cache.as_path())).unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Bundled);
        assert!(!loaded.catalog.models.is_empty());
    }

    #[test]
    fn offline_prefers_populated_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("llm-pricing.json");
        std::fs::write(
            &cache,
            r#"{"models": [{"id": "cached", "pricing": {"input_1m": 1.0, "output_1m": 2.0}}]}"#,
        )
        .unwrap();

        let loaded = load_default(true, Some(cache.as_path())).unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Cache);
        assert_eq!(loaded.catalog.models[0].id, "cached");
    }

    #[test]
    fn offline_without_cache_path_uses_bundled() {
        let loaded = load_default(true, None).unwrap();
        assert_eq!(loaded.origin, CatalogOrigin::Bundled);
    }

    #[test]
    fn origin_labels() {
        assert_eq!(CatalogOrigin::Cache.label(), "cache");
        assert_eq!(CatalogOrigin::Bundled.label(), "bundled");
        assert_eq!(CatalogOrigin::File("a.json".to_string()).label(), "a.json");
    }
}
