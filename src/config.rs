use crate::error::{LogPuzzleError, Result};
use crate::gallery::IndexTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_HOST: &str = "https://code.google.com";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractConfig,
    pub download: DownloadConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Prefix joined with every captured request path
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Request timeout in seconds; the HTTP client default applies when unset
    pub timeout: Option<u64>,
    pub user_agent: String,
    /// Abort on non-2xx responses instead of saving the body as-is
    pub require_success: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub template: IndexTemplate,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("logpuzzle/{}", env!("CARGO_PKG_VERSION")),
            require_success: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LogPuzzleError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LogPuzzleError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| LogPuzzleError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["logpuzzle.toml", ".logpuzzle.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref host) = cli_args.host {
            self.extract.host = host.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.download.timeout = Some(timeout);
        }

        if let Some(require_success) = cli_args.require_success {
            self.download.require_success = require_success;
        }

        if let Some(template) = cli_args.template {
            self.gallery.template = template;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| LogPuzzleError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| LogPuzzleError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_host(&self.extract.host)?;

        if self.download.timeout == Some(0) {
            return Err(LogPuzzleError::Config {
                message: "Download timeout must be greater than 0".to_string(),
            });
        }

        if self.download.user_agent.trim().is_empty() {
            return Err(LogPuzzleError::Config {
                message: "User agent must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

impl DownloadConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// The host is glued directly in front of request paths, so it must not end
/// with a slash or carry a path, query or fragment of its own.
pub fn validate_host(host: &str) -> Result<()> {
    let invalid = || LogPuzzleError::InvalidHost {
        host: host.to_string(),
    };

    let url = Url::parse(host).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    if host.ends_with('/') || url.path() != "/" || url.query().is_some() || url.fragment().is_some()
    {
        return Err(invalid());
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub timeout: Option<u64>,
    pub require_success: Option<bool>,
    pub template: Option<IndexTemplate>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_require_success(mut self, require_success: Option<bool>) -> Self {
        self.require_success = require_success;
        self
    }

    pub fn with_template(mut self, template: Option<IndexTemplate>) -> Self {
        self.template = template;
        self
    }
}
