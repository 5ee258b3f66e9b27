use llmcost::catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Unknown model: {id}")]
    UnknownModel { id: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("No models to compare")]
    NoModels,

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

impl AppError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
