//! Listing markup -> [`ThreadRecord`]s.
//!
//! Extraction is pure: no I/O, no sorting. Rows come out in document order.

use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::selectors::{CompiledSelectors, ListingSelectors};
use crate::types::ThreadRecord;

pub const DEFAULT_ORIGIN: &str = "https://www.pathofexile.com";

#[derive(Debug, Clone)]
pub struct Extractor {
    origin: String,
    selectors: CompiledSelectors,
}

impl Extractor {
    /// Build an extractor for pages served from `origin`.
    ///
    /// Fails if any selector in `selectors` does not parse.
    pub fn new(origin: impl Into<String>, selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            origin: origin.into(),
            selectors: selectors.compile()?,
        })
    }

    /// Extract every thread row from `markup`.
    ///
    /// Rows without a title link are skipped. Missing replies, date or author
    /// elements fall back to `0` / `None`.
    pub fn extract(&self, markup: &str) -> Vec<ThreadRecord> {
        let document = Html::parse_document(markup);

        document
            .select(&self.selectors.row)
            .filter_map(|row| self.extract_row(row))
            .collect()
    }

    fn extract_row(&self, row: ElementRef<'_>) -> Option<ThreadRecord> {
        let anchor = row.select(&self.selectors.title).next()?;
        let Some(href) = anchor.value().attr("href") else {
            tracing::debug!("Skipping row whose title link has no href");
            return None;
        };

        let replies = row
            .select(&self.selectors.replies)
            .next()
            .map(|el| parse_replies(&text_of(el)))
            .unwrap_or(0);

        let post_date = row
            .select(&self.selectors.post_date)
            .next()
            .map(|el| strip_date_prefix(&text_of(el)).to_string());

        let author = row.select(&self.selectors.author).next().map(text_of);

        Some(ThreadRecord {
            title: text_of(anchor).trim().to_string(),
            url: format!("{}{}", self.origin, href),
            thread_id: thread_id_from_href(href).to_string(),
            author,
            post_date,
            replies,
        })
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Last `/`-separated segment; the whole href when it has no `/`.
pub fn thread_id_from_href(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

/// Listing dates render as ", Jan 5, 2025 3:00:00 PM" next to the author link.
pub fn strip_date_prefix(text: &str) -> &str {
    text.trim_start_matches([',', ' '])
}

/// Reply counts that are empty or non-numeric count as zero.
///
/// Stricter integer parsing would reject `"1,204"` and accept `"-3"`; here the
/// thousands separator is dropped and negative counts become zero.
pub fn parse_replies(text: &str) -> u64 {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().unwrap_or(0)
}
