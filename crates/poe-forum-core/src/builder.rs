use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::ForumAggregator;
use crate::error::Result;
use crate::extractor::{Extractor, DEFAULT_ORIGIN};
use crate::fetcher::{FetchOptions, HttpFetcher, PageFetcher};
use crate::selectors::ListingSelectors;

pub struct ForumAggregatorBuilder {
    sources: Vec<String>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    fetch_options: FetchOptions,
    source_timeout: Option<Duration>,
    origin: String,
    selectors: ListingSelectors,
}

impl ForumAggregatorBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            fetcher: None,
            fetch_options: FetchOptions::default(),
            source_timeout: None,
            origin: DEFAULT_ORIGIN.to_string(),
            selectors: ListingSelectors::default(),
        }
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn source(mut self, url: impl Into<String>) -> Self {
        self.sources.push(url.into());
        self
    }

    /// Use a custom fetcher. When set, `fetch_options` is ignored.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Upper bound on fetch plus extraction for a single source.
    pub fn source_timeout(mut self, budget: Duration) -> Self {
        self.source_timeout = Some(budget);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn selectors(mut self, selectors: ListingSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn build(self) -> Result<ForumAggregator> {
        let extractor = Extractor::new(self.origin, &self.selectors)?;
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.fetch_options)?),
        };

        Ok(ForumAggregator::new(self.sources, fetcher, extractor, self.source_timeout))
    }
}

impl Default for ForumAggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
