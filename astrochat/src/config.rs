//! User configuration for astrochat.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/astrochat/config.toml`
//! (falling back to `~/.config/astrochat/config.toml`). Every key is optional and
//! a missing or broken file means defaults; config problems never stop startup.

use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_THEME: &str = "catppuccin-mocha";
const DEFAULT_LOG_FILE: &str = ".astrochat/astrochat.log";

/// Parsed `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme name, `"dark"` or `"catppuccin-mocha"`.
    pub theme: String,
    /// TOML seed conversation replacing the built-in demo.
    pub seed: Option<PathBuf>,
    /// TOML action script replayed after seeding.
    pub replay: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            seed: None,
            replay: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Returns the path to the astrochat config file.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("astrochat").join("config.toml")
}

/// Parses config text, falling back to defaults on error.
///
/// Returns the config plus a description of what went wrong, if anything, so the
/// caller can log it once logging is up.
pub fn parse(raw: &str) -> (Config, Option<String>) {
    match toml::from_str(raw) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    }
}

/// Loads the config file. A missing file is not a warning.
pub fn load() -> (Config, Option<String>) {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(raw) => {
            let (config, warning) = parse(&raw);
            (
                config,
                warning.map(|w| format!("config parse error in {}: {}", path.display(), w)),
            )
        }
        Err(_) => (Config::default(), None),
    }
}
