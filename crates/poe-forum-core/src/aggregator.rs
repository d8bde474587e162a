use futures::future::{join_all, FutureExt};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, ScrapeError};
use crate::extractor::Extractor;
use crate::fetcher::PageFetcher;
use crate::types::{ForumResponse, ThreadRecord};

/// Fetches every configured listing, extracts threads and merges them
/// newest first.
///
/// Built once at startup and shared across requests; each call to
/// [`ForumAggregator::collect`] owns its own accumulator.
pub struct ForumAggregator {
    sources: Vec<String>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Extractor,
    source_timeout: Option<Duration>,
}

impl ForumAggregator {
    pub fn new(
        sources: Vec<String>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Extractor,
        source_timeout: Option<Duration>,
    ) -> Self {
        Self {
            sources,
            fetcher,
            extractor,
            source_timeout,
        }
    }

    pub fn builder() -> crate::builder::ForumAggregatorBuilder {
        crate::builder::ForumAggregatorBuilder::new()
    }

    /// Fetch and extract every source concurrently, then sort the merged threads.
    ///
    /// A source that fails to fetch, answers non-2xx, exceeds the source
    /// timeout or panics during extraction is logged and contributes nothing.
    /// Dropping the returned future cancels all in-flight fetches.
    pub async fn collect(&self) -> ForumResponse {
        let outcomes = join_all(self.sources.iter().map(|url| self.collect_source(url))).await;

        let mut threads = self.sources.iter().zip(outcomes).fold(
            Vec::new(),
            |mut threads: Vec<ThreadRecord>, (url, outcome)| {
                match outcome {
                    Ok(records) => {
                        tracing::debug!(source = %url, threads = records.len(), "Extracted forum listing");
                        threads.extend(records);
                    }
                    Err(e) => {
                        tracing::warn!(source = %url, error = %e, "Skipping forum listing");
                    }
                }
                threads
            },
        );

        sort_threads(&mut threads);

        tracing::info!(
            sources = self.sources.len(),
            total_threads = threads.len(),
            "Collected forum threads"
        );

        ForumResponse::success(threads)
    }

    async fn collect_source(&self, url: &str) -> Result<Vec<ThreadRecord>> {
        let attempt = async {
            let outcome = AssertUnwindSafe(async {
                let markup = self.fetcher.fetch(url).await?;
                Ok::<_, ScrapeError>(self.extractor.extract(&markup))
            })
            .catch_unwind()
            .await;

            outcome.unwrap_or_else(|_| {
                Err(ScrapeError::Panicked {
                    url: url.to_string(),
                })
            })
        };

        match self.source_timeout {
            Some(budget) => tokio::time::timeout(budget, attempt)
                .await
                .unwrap_or_else(|_| {
                    Err(ScrapeError::Timeout {
                        url: url.to_string(),
                        budget,
                    })
                }),
            None => attempt.await,
        }
    }
}

/// Newest first by raw `post_date` text. Stable: ties keep their order, and
/// threads without a date sort last.
pub fn sort_threads(threads: &mut [ThreadRecord]) {
    threads.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, post_date: Option<&str>) -> ThreadRecord {
        ThreadRecord {
            title: format!("Thread {}", id),
            url: format!("https://www.pathofexile.com/forum/view-thread/{}", id),
            thread_id: id.to_string(),
            author: None,
            post_date: post_date.map(str::to_string),
            replies: 0,
        }
    }

    fn ids(threads: &[ThreadRecord]) -> Vec<&str> {
        threads.iter().map(|t| t.thread_id.as_str()).collect()
    }

    #[test]
    fn test_sort_descending() {
        let mut threads = vec![
            record("1", Some("2024-01-01")),
            record("2", Some("2024-06-01")),
        ];
        sort_threads(&mut threads);
        assert_eq!(ids(&threads), ["2", "1"]);
    }

    #[test]
    fn test_sort_missing_dates_last_and_stable() {
        let mut threads = vec![
            record("a", None),
            record("b", Some("2024-03-01")),
            record("c", None),
            record("d", Some("2024-03-01")),
            record("e", Some("2025-01-01")),
        ];
        sort_threads(&mut threads);
        assert_eq!(ids(&threads), ["e", "b", "d", "a", "c"]);
    }

    #[test]
    fn test_sorted_order_property() {
        let mut threads = vec![
            record("1", Some("b")),
            record("2", None),
            record("3", Some("a")),
            record("4", Some("c")),
            record("5", Some("")),
        ];
        sort_threads(&mut threads);
        for pair in threads.windows(2) {
            assert!(pair[0].sort_key() >= pair[1].sort_key());
        }
    }
}
