use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One thread summary as listed on a forum index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThreadRecord {
    pub title: String,
    /// Absolute URL: forum origin + the link's relative href.
    pub url: String,
    /// Last path segment of the href.
    pub thread_id: String,
    pub author: Option<String>,
    /// Raw date text as shown on the listing, leading ", " removed.
    pub post_date: Option<String>,
    pub replies: u64,
}

impl ThreadRecord {
    /// Key used for ordering: missing dates compare as the empty string.
    pub fn sort_key(&self) -> &str {
        self.post_date.as_deref().unwrap_or("")
    }
}

/// Envelope returned by `GET /api/forum`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForumResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub total_threads: usize,
    pub threads: Vec<ThreadRecord>,
}

impl ForumResponse {
    pub fn success(threads: Vec<ThreadRecord>) -> Self {
        Self {
            status: "success".to_string(),
            timestamp: Utc::now(),
            total_threads: threads.len(),
            threads,
        }
    }
}
