use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::Catalog;

/// Overrides the cache directory (used by tests and sandboxed installs)
pub(super) const CACHE_DIR_ENV: &str = "LLMCOST_CACHE_DIR";

pub(super) fn get_cache_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
        return Some(PathBuf::from(dir).join("llm-pricing.json"));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".cache").join("llmcost").join("llm-pricing.json"))
}

/// Only catalogs with at least one model count as a usable cache.
fn read_cache(path: &Path) -> Option<Catalog> {
    let file = File::open(path).ok()?;
    let catalog: Catalog = match serde_json::from_reader(file) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::debug!("Ignoring unreadable catalog cache {}: {e}", path.display());
            return None;
        }
    };
    if catalog.models.is_empty() {
        tracing::debug!("Ignoring empty catalog cache {}", path.display());
        return None;
    }
    Some(catalog)
}

pub(super) fn load_cache(path: &Path) -> Option<Catalog> {
    read_cache(path)
}

pub(super) fn load_cache_if_fresh(path: &Path, ttl: Duration) -> Option<(Catalog, Duration)> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let age = SystemTime::now().duration_since(modified).ok()?;
    if age > ttl {
        return None;
    }
    read_cache(path).map(|catalog| (catalog, age))
}

pub(super) fn save_cache(path: &Path, catalog: &Catalog) {
    if catalog.models.is_empty() {
        return;
    }
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match File::create(path) {
        Ok(mut file) => {
            if let Err(e) = serde_json::to_writer(&mut file, catalog) {
                tracing::warn!("Failed to write catalog cache {}: {e}", path.display());
            }
        }
        Err(e) => tracing::warn!("Failed to create catalog cache {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_MODEL: &str =
        r#"{"models": [{"id": "m1", "pricing": {"input_1m": 1.0, "output_1m": 2.0}}]}"#;

    fn cache_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("llm-pricing.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_populated_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = cache_file(&dir, ONE_MODEL);
        assert_eq!(load_cache(&path).map(|c| c.models.len()), Some(1));
        let (catalog, _) = load_cache_if_fresh(&path, Duration::from_secs(60)).unwrap();
        assert_eq!(catalog.models[0].id, "m1");
    }

    #[test]
    fn empty_or_corrupt_cache_is_treated_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        for content in [r#"{"models": []}"#, "{}", "not json"] {
            let path = cache_file(&dir, content);
            assert!(load_cache(&path).is_none(), "{content}");
            assert!(load_cache_if_fresh(&path, Duration::from_secs(60)).is_none());
        }
    }

    #[test]
    fn empty_catalog_is_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("llm-pricing.json");
        save_cache(&path, &Catalog::default());
        assert!(!path.exists());

        let catalog = Catalog::from_json_str(ONE_MODEL).unwrap();
        save_cache(&path, &catalog);
        assert_eq!(load_cache(&path), Some(catalog));
    }
}
