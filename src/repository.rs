//! Remote repositories and the configuration which lists them.

use std::path::PathBuf;
use std::time::Duration;

use crate::transport::{HttpOptions, HttpTransport, LocalCache, ProxyConfig};

/// Errors encountered when parsing a resolver configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No `[[repository]]` entries were given.
    #[error("expected at least one '[[repository]]' entry")]
    NoRepositories,

    /// Two repositories share an id.
    #[error("repository id '{id}' is declared more than once")]
    DuplicateRepository { id: String },

    /// A toml deserialisation error occurred.
    #[error(transparent)]
    TomlInvalid(#[from] toml::de::Error),
}

fn enabled_by_default() -> bool {
    true
}

/// A remote repository, tried in the order it appears in the configuration.
#[derive(Debug, Clone, serde::Deserialize, PartialEq, Eq)]
pub struct Repository {
    id: String,
    url: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

impl Repository {
    pub fn new<I: Into<String>, U: Into<String>>(id: I, url: U) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            enabled: true,
        }
    }

    /// A repository which resolution skips.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The full URL of a repository-relative path.
    pub fn url_for(&self, target: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.url)?;
        if !self.enabled {
            write!(f, " [disabled]")?;
        }
        Ok(())
    }
}

/// Settings for a resolver backed by the network transport.
///
/// ```toml
/// cache-dir = "/home/me/.cache/fetch-artifact"
/// proxy-env = "https_proxy"
/// timeout-secs = 30
///
/// [[repository]]
/// id = "central"
/// url = "https://repo1.maven.org/maven2"
/// ```
#[derive(Debug, Clone, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    pub cache_dir: PathBuf,
    /// Environment variable holding the proxy URL. `https_proxy` when omitted.
    #[serde(default)]
    pub proxy_env: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default, rename = "repository")]
    pub repositories: Vec<Repository>,
}

impl ResolverConfig {
    /// Parse and validate a TOML configuration document.
    pub fn try_parse_toml<S: AsRef<str>>(toml_str: S) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str.as_ref())?;
        if config.repositories.is_empty() {
            return Err(ConfigError::NoRepositories);
        }
        let mut seen = std::collections::HashSet::new();
        for repository in &config.repositories {
            if !seen.insert(repository.id()) {
                return Err(ConfigError::DuplicateRepository {
                    id: repository.id().to_string(),
                });
            }
        }
        Ok(config)
    }

    /// Read the proxy from the configured environment variable, once.
    pub fn proxy(&self) -> Result<Option<ProxyConfig>, crate::Error> {
        Ok(match &self.proxy_env {
            Some(var) => ProxyConfig::from_env_var(var)?,
            None => ProxyConfig::from_env()?,
        })
    }

    /// Build the network transport this configuration describes, creating the cache directory.
    pub fn http_transport(&self) -> Result<HttpTransport, crate::Error> {
        let cache = LocalCache::create(&self.cache_dir)?;
        let options = HttpOptions {
            proxy: self.proxy()?,
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..HttpOptions::default()
        };
        HttpTransport::new(cache, options)
    }
}
