//! Configuration types for sampleseek.
//!
//! [`Config::load`] reads `~/.config/sampleseek/config.toml` on top of the
//! built-in defaults, then applies `SAMPLESEEK__SECTION__KEY` environment
//! overrides (`SAMPLESEEK__RESOLVER__MATCHERS` takes a comma-separated
//! list). [`Config::defaults`] returns the built-in defaults without
//! touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::execution::ExecutionMode;
use crate::matcher::MatcherSet;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[resolver]
execution   = "auto"
max_workers = 4
matchers    = ["sample-name", "stage-annotation", "stage-method"]

[logging]
filter = "warn"
"#;

const ENV_PREFIX: &str = "SAMPLESEEK";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/sampleseek/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[resolver]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub execution: ExecutionMode,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Built-in matchers to register, by name. Empty means all of them.
    #[serde(default)]
    pub matchers: Vec<String>,
}

fn default_max_workers() -> usize { 4 }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::default(),
            max_workers: default_max_workers(),
            matchers: Vec::new(),
        }
    }
}

/// `[logging]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sampleseek/config.toml` if it exists, layered on
    /// top of the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::build(&config_path(), false)
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::build(path, true)
    }

    fn build(path: &Path, required: bool) -> anyhow::Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("resolver.matchers"),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(&self) -> anyhow::Result<()> {
        MatcherSet::from_names(&self.resolver.matchers)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sampleseek")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
