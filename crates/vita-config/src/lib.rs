//! Configuration management for vita.
//!
//! Parses `vita.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sections
//!
//! - `[site]` — data/template/output paths, resolved relative to the
//!   config file.
//! - `[author]` — primary author identity driving citation emphasis.
//! - `[[press]]` — title-pattern → press-link rules; when absent, the
//!   renderer's built-in table applies.
//! - `[metrics]` — Altmetric badge hydration switch and timeout.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vita.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override data document path.
    pub data: Option<PathBuf>,
    /// Override template path.
    pub template: Option<PathBuf>,
    /// Override output path.
    pub output: Option<PathBuf>,
    /// Override metrics enabled flag.
    pub metrics_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site paths (relative strings from TOML).
    site: SiteConfigRaw,
    /// Primary author identity.
    pub author: Option<AuthorConfig>,
    /// Press-link rules. `None` keeps the built-in table.
    pub press: Option<Vec<PressEntry>>,
    /// Metric badge configuration.
    pub metrics: MetricsConfig,

    /// Resolved site paths (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site paths as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    data: Option<String>,
    template: Option<String>,
    output: Option<String>,
}

/// Resolved site paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// JSON data document.
    pub data: PathBuf,
    /// HTML template with region markers.
    pub template: PathBuf,
    /// Populated page destination.
    pub output: PathBuf,
}

/// Primary author identity.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthorConfig {
    /// Surname, e.g. "Chim".
    pub surname: String,
    /// Given-name initials in order, e.g. `["M", "M"]`.
    #[serde(default)]
    pub initials: Vec<String>,
}

/// One press-link rule.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PressEntry {
    /// Title regex the rule applies to.
    pub pattern: String,
    /// Links attached when the pattern matches.
    #[serde(default)]
    pub links: Vec<PressLinkEntry>,
}

/// One link within a press rule.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PressLinkEntry {
    /// Visible button label.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// Metric badge configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether badge hydration runs during build.
    pub enabled: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_secs: 10,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `vita.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution,
    /// allowing CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing/validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data) = &settings.data {
            self.site_resolved.data.clone_from(data);
        }
        if let Some(template) = &settings.template {
            self.site_resolved.template.clone_from(template);
        }
        if let Some(output) = &settings.output {
            self.site_resolved.output.clone_from(output);
        }
        if let Some(enabled) = settings.metrics_enabled {
            self.metrics.enabled = enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            author: None,
            press: None,
            metrics: MetricsConfig::default(),
            site_resolved: SiteConfig {
                data: base.join("site-data.json"),
                template: base.join("template.html"),
                output: base.join("public/index.html"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(author) = &self.author {
            require_non_empty(&author.surname, "author.surname")?;
            for initial in &author.initials {
                require_non_empty(initial, "author.initials entries")?;
            }
        }

        if let Some(press) = &self.press {
            for entry in press {
                require_non_empty(&entry.pattern, "press.pattern")?;
                for link in &entry.links {
                    require_non_empty(&link.label, "press.links.label")?;
                    require_non_empty(&link.url, "press.links.url")?;
                }
            }
        }

        if self.metrics.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "metrics.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            data: resolve(self.site.data.as_deref(), "site-data.json"),
            template: resolve(self.site.template.as_deref(), "template.html"),
            output: resolve(self.site.output.as_deref(), "public/index.html"),
        };
    }
}
