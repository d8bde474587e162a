pub mod types;
pub mod error;
pub mod selectors;
pub mod extractor;
pub mod fetcher;
pub mod aggregator;
pub mod builder;

pub use types::{ForumResponse, ThreadRecord};
pub use error::{Result, ScrapeError};
pub use selectors::ListingSelectors;
pub use extractor::{Extractor, DEFAULT_ORIGIN};
pub use fetcher::{FetchOptions, HttpFetcher, PageFetcher, DEFAULT_USER_AGENT};
pub use aggregator::{sort_threads, ForumAggregator};
pub use builder::ForumAggregatorBuilder;
