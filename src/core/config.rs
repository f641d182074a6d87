//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavstackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub allow_duplicates: Option<bool>,
    pub pages: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "navstack.log";
pub const DEFAULT_ALLOW_DUPLICATES: bool = true;
pub const DEFAULT_PAGES: [&str; 4] = ["home", "inbox", "settings", "profile"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: String,
    pub allow_duplicates: bool,
    pub pages: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&NavstackConfig::default(), &CliOverrides::default())
    }
}

/// Values passed on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack").join("config.toml"))
}

/// Load config from `~/.navstack/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavstackConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavstackConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavstackConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<NavstackConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavstackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# navstack Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "navstack.log"          # Or set NAVSTACK_LOG_FILE env var

# [navigation]
# allow_duplicates = true            # Default push policy for the TUI and replay scripts
# pages = ["home", "inbox", "settings", "profile"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NavstackConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("NAVSTACK_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var("NAVSTACK_LOG_FILE").ok())
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // An empty catalogue would leave the TUI with nothing to push
    let pages = config
        .navigation
        .pages
        .clone()
        .filter(|pages| !pages.is_empty())
        .unwrap_or_else(|| DEFAULT_PAGES.iter().map(|p| p.to_string()).collect());

    ResolvedConfig {
        log_level,
        log_file,
        allow_duplicates: config
            .navigation
            .allow_duplicates
            .unwrap_or(DEFAULT_ALLOW_DUPLICATES),
        pages,
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match LevelFilter::from_str(raw.trim()) {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level {:?}, falling back to default", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NavstackConfig::default();
        assert!(config.navigation.pages.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NavstackConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                log_file: None,
            },
            navigation: NavigationConfig {
                allow_duplicates: Some(false),
                pages: Some(vec!["feed".to_string(), "detail".to_string()]),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert!(!resolved.allow_duplicates);
        assert_eq!(resolved.pages, vec!["feed", "detail"]);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = NavstackConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                log_file: Some("from-config.log".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            log_level: Some("trace".to_string()),
            log_file: Some("from-cli.log".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, "from-cli.log");
    }

    #[test]
    fn test_empty_page_list_falls_back() {
        let config = NavstackConfig {
            navigation: NavigationConfig {
                allow_duplicates: None,
                pages: Some(Vec::new()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.pages.len(), DEFAULT_PAGES.len());
        assert_eq!(resolved.allow_duplicates, DEFAULT_ALLOW_DUPLICATES);
    }

    #[test]
    fn test_parse_level_rejects_garbage() {
        assert_eq!(parse_level("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[navigation]
allow_duplicates = false
"#;
        let config: NavstackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.navigation.allow_duplicates, Some(false));
        assert!(config.navigation.pages.is_none());
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_load_config_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[navigation\nallow_duplicates = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
