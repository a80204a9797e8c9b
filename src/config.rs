use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "postkit.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    /// Root of the `<yyyy>/<mm>/<dd>/<lang>.md` tree
    pub content_dir: PathBuf,
    /// JSON array with the known tags
    pub tags_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("blog"),
            tags_file: PathBuf::from("tags.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Validation {
    /// Require every translationKey to exist in both languages
    pub strict_translations: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub validation: Validation,
    pub log: Option<Log>,
}

pub fn read_config(cfg_path: &PathBuf) -> Result<Config> {
    let cfg_content = fs::read_to_string(cfg_path)
        .with_context(|| format!("Error opening configuration file {}", cfg_path.display()))?;

    parse_config(&cfg_content)
        .with_context(|| format!("Error parsing configuration file {}", cfg_path.display()))
}

pub fn parse_config(cfg_content: &str) -> Result<Config> {
    let cfg = toml::from_str::<Config>(cfg_content)?;
    Ok(cfg)
}

fn find_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    if let Some(cfg_dir) = dirs::config_dir() {
        let path = cfg_dir.join("postkit").join(CFG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Explicit path first, then `./postkit.toml`, then the user config dir.
/// Without any file the defaults are used.
pub fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    match cfg_path.or_else(find_config_path) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}
