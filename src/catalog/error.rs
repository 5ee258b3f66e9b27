use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to fetch catalog from {url} after {attempts} attempts")]
    Fetch { url: String, attempts: usize },

    #[error("Catalog {source_label} is unavailable in offline mode")]
    Offline { source_label: String },

    #[error("Catalog {source_label} contains no models")]
    Empty { source_label: String },
}
