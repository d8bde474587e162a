use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// CSS selectors describing a forum listing page.
///
/// `row` is matched against the whole document; every other selector is
/// evaluated inside a single matched row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListingSelectors {
    pub row: String,
    pub title: String,
    pub replies: String,
    pub post_date: String,
    pub author: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            row: "tr".to_string(),
            title: "div.title a".to_string(),
            replies: "td.views span".to_string(),
            post_date: "span.post_date".to_string(),
            author: "span.post_by_account a".to_string(),
        }
    }
}

/// Parsed form of [`ListingSelectors`].
#[derive(Debug, Clone)]
pub(crate) struct CompiledSelectors {
    pub row: Selector,
    pub title: Selector,
    pub replies: Selector,
    pub post_date: Selector,
    pub author: Selector,
}

impl ListingSelectors {
    pub(crate) fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            row: parse(&self.row)?,
            title: parse(&self.title)?,
            replies: parse(&self.replies)?,
            post_date: parse(&self.post_date)?,
            author: parse(&self.author)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
