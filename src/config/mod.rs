//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `ASKPOOL_*` environment
//! variables. Ranking tunables are folded into a [`RankingConfig`] once at
//! startup via [`Config::ranking_config`] and never mutated afterwards.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DimConfig};
use crate::ranking::{
    DEFAULT_FAQ_MIN_SIMILARITY, DEFAULT_MAX_FAQ_RETURN, DEFAULT_MAX_REVIEW_RETURN, RankingConfig,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ASKPOOL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Base URL of the embedding API. Default: `https://api.openai.com/v1`.
    pub embed_url: String,

    /// Embedding model name. Default: `text-embedding-3-small`.
    pub embed_model: String,

    /// Embedding dimensionality. Default: `1536`.
    pub embedding_dim: usize,

    /// Minimum similarity for the primary FAQ path. Default: `0.62`.
    pub faq_min_similarity: f32,

    /// Maximum FAQ passages returned. Default: `3`.
    pub max_faq_return: usize,

    /// Maximum reviews returned. Default: `3`.
    pub max_review_return: usize,

    /// Rescue keyword overrides (comma-separated env value). Empty means
    /// use the built-in list.
    pub rescue_keywords: Vec<String>,

    /// Whether the review pool has embeddings and supports vector search.
    /// When `false` the engine falls back to a metadata-filtered scan.
    /// Default: `true`.
    pub review_vector_search: bool,

    /// Whether upstream failures degrade to a soft `source=none` answer
    /// (`true`) or propagate to the caller (`false`). Debug-mode requests
    /// always propagate. Default: `true`.
    pub fail_soft: bool,
}

/// Default Qdrant URL used when `ASKPOOL_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default embedding API base URL.
pub const DEFAULT_EMBED_URL: &str = "https://api.openai.com/v1";

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            faq_min_similarity: DEFAULT_FAQ_MIN_SIMILARITY,
            max_faq_return: DEFAULT_MAX_FAQ_RETURN,
            max_review_return: DEFAULT_MAX_REVIEW_RETURN,
            rescue_keywords: Vec::new(),
            review_vector_search: true,
            fail_soft: true,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ASKPOOL_PORT";
    const ENV_BIND_ADDR: &'static str = "ASKPOOL_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "ASKPOOL_QDRANT_URL";
    const ENV_EMBED_URL: &'static str = "ASKPOOL_EMBED_URL";
    const ENV_EMBED_MODEL: &'static str = "ASKPOOL_EMBED_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "ASKPOOL_EMBEDDING_DIM";
    const ENV_FAQ_MIN_SIMILARITY: &'static str = "ASKPOOL_FAQ_MIN_SIMILARITY";
    const ENV_MAX_FAQ_RETURN: &'static str = "ASKPOOL_MAX_FAQ_RETURN";
    const ENV_MAX_REVIEW_RETURN: &'static str = "ASKPOOL_MAX_REVIEW_RETURN";
    const ENV_RESCUE_KEYWORDS: &'static str = "ASKPOOL_RESCUE_KEYWORDS";
    const ENV_REVIEW_VECTOR_SEARCH: &'static str = "ASKPOOL_REVIEW_VECTOR_SEARCH";
    const ENV_FAIL_SOFT: &'static str = "ASKPOOL_FAIL_SOFT";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let embed_url = Self::parse_string_from_env(Self::ENV_EMBED_URL, defaults.embed_url);
        let embed_model = Self::parse_string_from_env(Self::ENV_EMBED_MODEL, defaults.embed_model);
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim);
        let faq_min_similarity = Self::parse_f32_from_env(
            Self::ENV_FAQ_MIN_SIMILARITY,
            defaults.faq_min_similarity,
        )?;
        let max_faq_return =
            Self::parse_usize_from_env(Self::ENV_MAX_FAQ_RETURN, defaults.max_faq_return);
        let max_review_return =
            Self::parse_usize_from_env(Self::ENV_MAX_REVIEW_RETURN, defaults.max_review_return);
        let rescue_keywords = Self::parse_list_from_env(Self::ENV_RESCUE_KEYWORDS);
        let review_vector_search =
            Self::parse_bool_from_env(Self::ENV_REVIEW_VECTOR_SEARCH, defaults.review_vector_search);
        let fail_soft = Self::parse_bool_from_env(Self::ENV_FAIL_SOFT, defaults.fail_soft);

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            embed_url,
            embed_model,
            embedding_dim,
            faq_min_similarity,
            max_faq_return,
            max_review_return,
            rescue_keywords,
            review_vector_search,
            fail_soft,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        DimConfig::new(self.embedding_dim).validate()?;

        if !(0.0..=1.0).contains(&self.faq_min_similarity) {
            return Err(ConfigError::ThresholdOutOfRange {
                var: Self::ENV_FAQ_MIN_SIMILARITY,
                value: self.faq_min_similarity,
            });
        }

        if self.max_faq_return == 0 {
            return Err(ConfigError::ZeroReturnCap {
                var: Self::ENV_MAX_FAQ_RETURN,
            });
        }

        if self.max_review_return == 0 {
            return Err(ConfigError::ZeroReturnCap {
                var: Self::ENV_MAX_REVIEW_RETURN,
            });
        }

        Ok(())
    }

    /// Builds the read-only ranking tunables from this configuration.
    pub fn ranking_config(&self) -> RankingConfig {
        let mut ranking = RankingConfig {
            faq_min_similarity: self.faq_min_similarity,
            max_faq_return: self.max_faq_return,
            max_review_return: self.max_review_return,
            ..RankingConfig::default()
        };

        if !self.rescue_keywords.is_empty() {
            ranking.rescue_keywords = self.rescue_keywords.clone();
        }

        ranking
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::FloatParseError {
                var: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| {
                let v = v.trim().to_ascii_lowercase();
                matches!(v.as_str(), "1" | "true" | "yes" | "on")
            })
            .unwrap_or(default)
    }

    fn parse_list_from_env(var_name: &str) -> Vec<String> {
        env::var(var_name)
            .ok()
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
