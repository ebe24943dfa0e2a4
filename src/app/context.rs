use std::sync::Arc;

use crate::app::error::Result;
use crate::client::http::HttpContentSource;
use crate::client::ContentSource;
use crate::config::Config;
use crate::normalizer::Normalizer;

pub struct AppContext {
    pub config: Config,
    pub source: Arc<dyn ContentSource>,
    pub normalizer: Normalizer,
    pub preview_ref: Option<String>,
}

impl AppContext {
    pub fn new(config: Config, preview_ref: Option<String>) -> Result<Self> {
        let source: Arc<dyn ContentSource> = Arc::new(HttpContentSource::new(&config.api)?);

        Ok(Self {
            config,
            source,
            normalizer: Normalizer::new(),
            preview_ref,
        })
    }

    /// Wire the context around an existing source. Used by tests to swap in
    /// an in-memory repository.
    pub fn with_source(
        config: Config,
        source: Arc<dyn ContentSource>,
        preview_ref: Option<String>,
    ) -> Self {
        Self {
            config,
            source,
            normalizer: Normalizer::new(),
            preview_ref,
        }
    }

    /// The document type articles live under in the repository.
    pub fn document_type(&self) -> &str {
        &self.config.api.document_type
    }
}
