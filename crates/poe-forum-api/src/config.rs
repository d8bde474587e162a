use config::{Config as ConfigLoader, ConfigError, Environment, File};
use poe_forum_core::{FetchOptions, ListingSelectors, DEFAULT_ORIGIN, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub forum: ForumConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

/// Where to scrape from and how.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumConfig {
    /// Prefix for the relative thread links found on listing pages.
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// Per-source GET timeout
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub selectors: ListingSelectors,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            sources: default_sources(),
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            selectors: ListingSelectors::default(),
        }
    }
}

impl ForumConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_sources() -> Vec<String> {
    // Important announcements. Other boards (3: game announcements,
    // 366: development manifestos, 54: technical news) can be added via config.
    vec!["https://www.pathofexile.com/forum/view-forum/2212".to_string()]
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// How long a single source may take before it is left out of the response.
    ///
    /// The forum timeout, capped at 80% of the request timeout so slow boards
    /// are dropped before the whole request times out.
    pub fn source_timeout(&self) -> Duration {
        let fetch = Duration::from_secs(self.forum.timeout_secs);
        let request = Duration::from_secs(self.server.request_timeout_secs);
        fetch.min(request.mul_f64(0.8))
    }

    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables: POE_FORUM_<SECTION>__<FIELD>, e.g.
    ///    POE_FORUM_SERVER__PORT=9000 or
    ///    POE_FORUM_FORUM__SOURCES=https://a/forum/1,https://a/forum/2
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("POE_FORUM")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("forum.sources")
                    .with_list_parse_key("cors.origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [forum]
            origin = "https://www.pathofexile.com"
            sources = [
                "https://www.pathofexile.com/forum/view-forum/2212",
                "https://www.pathofexile.com/forum/view-forum/54",
            ]
            timeout_secs = 10

            [forum.selectors]
            replies = "td.replies span"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_secs, 60);
        assert_eq!(config.forum.sources.len(), 2);
        assert_eq!(config.forum.selectors.replies, "td.replies span");
        assert_eq!(config.forum.selectors.title, "div.title a");
        assert_eq!(config.forum.fetch_options().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cors.origins, ["*"]);
        assert_eq!(config.forum.origin, "https://www.pathofexile.com");
        assert_eq!(
            config.forum.sources,
            ["https://www.pathofexile.com/forum/view-forum/2212"]
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_source_timeout_stays_under_request_timeout() {
        let mut config = Config::default();
        assert_eq!(config.source_timeout(), Duration::from_secs(30));

        config.forum.timeout_secs = 5;
        config.server.request_timeout_secs = 1;
        assert_eq!(config.source_timeout(), Duration::from_millis(800));

        config.server.request_timeout_secs = 0;
        assert_eq!(config.source_timeout(), Duration::ZERO);
    }
}
