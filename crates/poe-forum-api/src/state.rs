use std::sync::Arc;

use poe_forum_core::{ForumAggregator, ScrapeError};

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Built once at startup. The aggregator holds the source list, extractor
/// and pooled HTTP client; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Arc<ForumAggregator>,
}

impl AppState {
    pub fn new(config: Config, aggregator: ForumAggregator) -> Self {
        Self {
            config: Arc::new(config),
            aggregator: Arc::new(aggregator),
        }
    }

    /// Build the aggregator described by `config.forum`.
    pub fn from_config(config: Config) -> Result<Self, ScrapeError> {
        let aggregator = ForumAggregator::builder()
            .sources(config.forum.sources.clone())
            .origin(config.forum.origin.clone())
            .selectors(config.forum.selectors.clone())
            .fetch_options(config.forum.fetch_options())
            .source_timeout(config.source_timeout())
            .build()?;

        Ok(Self::new(config, aggregator))
    }
}
