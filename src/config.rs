//! Runtime settings: defaults, an optional TOML file, then environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Settings file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "deck-quiz.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_document_bytes: usize,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".into(),
            api_key: None,
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 4000,
            timeout_secs: 120,
            max_document_bytes: 32 * 1024 * 1024,
            log_file: PathBuf::from("deck-quiz.log"),
            log_level: "info".into(),
        }
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists,
/// then apply environment overrides.
///
/// # Errors
///
/// An explicitly named file that cannot be read, any file that does not
/// parse, and malformed numeric environment values are errors.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => read_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_overrides(&mut settings, |name| env::var(name).ok())?;
    Ok(settings)
}

fn read_file(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a TOML settings document. Missing keys keep their defaults.
pub fn parse_settings(raw: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}

/// Overlay values found through `lookup` (normally the process environment).
///
/// # Errors
///
/// Returns `ConfigError::InvalidNumber` for numeric variables that do not parse.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty("DECK_QUIZ_API_KEY").or_else(|| non_empty("ANTHROPIC_API_KEY")) {
        settings.api_key = Some(key);
    }
    if let Some(v) = non_empty("DECK_QUIZ_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = non_empty("DECK_QUIZ_MODEL") {
        settings.model = v;
    }
    if let Some(v) = non_empty("DECK_QUIZ_MAX_TOKENS") {
        settings.max_tokens = parse_positive("DECK_QUIZ_MAX_TOKENS", &v)?;
    }
    if let Some(v) = non_empty("DECK_QUIZ_TIMEOUT_SECS") {
        settings.timeout_secs = parse_positive("DECK_QUIZ_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = non_empty("DECK_QUIZ_LOG") {
        settings.log_level = v;
    }
    Ok(())
}

fn parse_positive<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
