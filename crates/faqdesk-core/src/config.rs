//! FaqDesk configuration system.

use faqdesk_search::{DEFAULT_DIMENSIONS, RankerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaqDeskError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqDeskConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl FaqDeskConfig {
    /// Load config from the default path (~/.faqdesk/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqDeskError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| FaqDeskError::Config(format!("Failed to parse config: {e}")))
    }

    /// Resolve the config for a process: explicit path, then `FAQDESK_CONFIG`,
    /// then the default path. `DATABASE_URL` overrides the database path.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match std::env::var("FAQDESK_CONFIG") {
                Ok(path) => Self::load_from(Path::new(&path))?,
                Err(_) => Self::load()?,
            },
        };
        config.apply_database_url(std::env::var("DATABASE_URL").ok().as_deref());
        config.validate()?;
        Ok(config)
    }

    /// Override `database.path` from a `DATABASE_URL`-style value.
    pub fn apply_database_url(&mut self, url: Option<&str>) {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.database.path = parse_database_url(url);
        }
    }

    /// Reject settings the search core or the HTTP layer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let s = &self.search;
        if s.max_limit == 0 {
            return Err(FaqDeskError::Config("search.max_limit must be >= 1".into()));
        }
        if s.default_limit == 0 || s.default_limit > s.max_limit {
            return Err(FaqDeskError::Config(format!(
                "search.default_limit must be within 1..={}",
                s.max_limit
            )));
        }
        faqdesk_search::Ranker::new(self.ranker_config())
            .map_err(|e| FaqDeskError::Config(format!("search: {e}")))?;
        Ok(())
    }

    /// Ranker settings derived from `[search]`.
    pub fn ranker_config(&self) -> RankerConfig {
        RankerConfig {
            dimensions: self.search.dimensions,
            top_n: self.search.default_limit,
            min_similarity: self.search.min_similarity,
        }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the FaqDesk home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".faqdesk")
    }
}

/// Accepts a plain path or an SQLAlchemy-style `sqlite:///path` URL.
fn parse_database_url(url: &str) -> String {
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .unwrap_or(url)
        .to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Similarity search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default)]
    pub min_similarity: f64,
}

fn default_dimensions() -> usize { DEFAULT_DIMENSIONS }
fn default_limit() -> usize { 5 }
fn default_max_limit() -> usize { 20 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_similarity: 0.0,
        }
    }
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String { "~/.faqdesk/faq.db".into() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

impl DatabaseConfig {
    /// Path with `~` expanded. `:memory:` is passed through.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}
