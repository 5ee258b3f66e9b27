use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) offline: bool,
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// Catalog path or URL
    #[serde(default)]
    pub(crate) catalog: Option<String>,
    #[serde(default)]
    pub(crate) alpha: Option<f64>,
    #[serde(default)]
    pub(crate) beta: Option<f64>,
    /// Default model selection
    #[serde(default)]
    pub(crate) models: Vec<String>,
}

/// Result of probing the config locations.
///
/// Logging is configured from the config itself, so problems are
/// collected here and reported once the subscriber is installed.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) errors: Vec<String>,
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for error in &self.errors {
            tracing::warn!("{error}");
        }
        if let Some(path) = &self.path {
            tracing::debug!("Loaded config from {}", path.display());
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        loaded.config = config;
                        loaded.path = Some(path);
                        return loaded;
                    }
                    Err(e) => loaded
                        .errors
                        .push(format!("Failed to parse {}: {}", path.display(), e)),
                }
            }
        }

        loaded
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/llmcost/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("llmcost").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("llmcost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.llmcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".llmcost.toml"));
        }

        paths
    }
}
