// Configuration loading and parsing (courtside.toml, accolades.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::accolades::{AccoladeRecord, AccoladeTable};
use crate::stats::FetchOptions;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

pub const SETTINGS_FILE: &str = "courtside.toml";
pub const ACCOLADES_FILE: &str = "accolades.toml";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
    /// Entries from accolades.toml, applied over the built-in table.
    pub accolades: Vec<AccoladeEntry>,
    /// Directory relative paths in the config (the log directory) resolve
    /// against. Empty means the current directory.
    pub root: PathBuf,
}

impl Config {
    /// The built-in accolade table extended with the configured entries.
    pub fn accolade_table(&self) -> AccoladeTable {
        let mut table = AccoladeTable::builtin();
        table.extend(self.accolades.iter().map(|e| {
            (
                e.name.clone(),
                AccoladeRecord::new(e.championships, e.finals_mvps, e.mvps),
            )
        }));
        table
    }

    /// Where log files go: `logging.directory` under `root`, unless absolute.
    pub fn log_dir(&self) -> PathBuf {
        self.root.join(&self.logging.directory)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            collapse_traded_seasons: self.provider.collapse_traded_seasons,
        }
    }
}

// ---------------------------------------------------------------------------
// courtside.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for courtside.toml. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    provider: ProviderConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub league_id: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Season whose all-time player index is used for name lookup, e.g.
    /// "2024-25". Derived from today's date when absent.
    pub index_season: Option<String>,
    pub collapse_traded_seasons: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stats.nba.com/stats".into(),
            league_id: "00".into(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:72.0) \
                         Gecko/20100101 Firefox/72.0"
                .into(),
            index_season: None,
            collapse_traded_seasons: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".into(),
            filter: "courtside=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// accolades.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
struct AccoladesFile {
    #[serde(default)]
    player: Vec<AccoladeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccoladeEntry {
    pub name: String,
    pub championships: u32,
    pub finals_mvps: u32,
    pub mvps: u32,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from a config directory containing
/// (optionally) `courtside.toml` and `accolades.toml`. Missing files fall
/// back to built-in defaults.
pub fn load_from_config_dir(config_dir: &Path) -> Result<Config, ConfigError> {
    let settings_path = config_dir.join(SETTINGS_FILE);
    let settings: SettingsFile = match read_optional(&settings_path)? {
        Some(text) => toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?,
        None => SettingsFile::default(),
    };

    let accolades_path = config_dir.join(ACCOLADES_FILE);
    let accolades: AccoladesFile = match read_optional(&accolades_path)? {
        Some(text) => toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: accolades_path.clone(),
            source: e,
        })?,
        None => AccoladesFile::default(),
    };

    let config = Config {
        provider: settings.provider,
        logging: settings.logging,
        accolades: accolades.player,
        root: config_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Load configuration from `<base_dir>/config`, first copying any missing
/// files from `<base_dir>/defaults`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    let mut config = load_from_config_dir(&base_dir.join("config"))?;
    config.root = base_dir.to_path_buf();
    Ok(config)
}

/// Ensure config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&path, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", path.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory when it holds `config/` or `defaults/`, otherwise from the
/// per-user config directory. With no files anywhere, defaults apply.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return load_config_from(&cwd);
    }
    match directories::ProjectDirs::from("", "", "courtside") {
        Some(dirs) => {
            let mut config = load_from_config_dir(dirs.config_dir())?;
            config.root = dirs.data_local_dir().to_path_buf();
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// True for seasons written as `YYYY-YY` where the second year follows the first.
pub fn is_valid_season(season: &str) -> bool {
    let Some((start, end)) = season.split_once('-') else {
        return false;
    };
    if start.len() != 4 || end.len() != 2 {
        return false;
    }
    match (start.parse::<u32>(), end.parse::<u32>()) {
        (Ok(s), Ok(e)) => (s + 1) % 100 == e,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let provider = &config.provider;

    if !(provider.base_url.starts_with("http://") || provider.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "provider.base_url".into(),
            message: format!("must be an http(s) URL, got {:?}", provider.base_url),
        });
    }

    if provider.league_id.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "provider.league_id".into(),
            message: "must not be empty".into(),
        });
    }

    if provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "provider.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if let Some(season) = &provider.index_season {
        if !is_valid_season(season) {
            return Err(ConfigError::ValidationError {
                field: "provider.index_season".into(),
                message: format!("expected YYYY-YY, got {season:?}"),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    for entry in &config.accolades {
        let key = crate::accolades::normalize_name(&entry.name);
        if key.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "player.name".into(),
                message: "must not be empty".into(),
            });
        }
        if !seen.insert(key) {
            return Err(ConfigError::ValidationError {
                field: "player.name".into(),
                message: format!("duplicate accolade entry for {:?}", entry.name),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
