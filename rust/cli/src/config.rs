//! Resolved CLI configuration: defaults, optional config file, and
//! environment overrides.
//!
//! The AI-imperfection switch (`ai_mistakes`) is the persisted setting
//! the engine consumes; any failure reading or parsing the file falls
//! back to defaults rather than aborting.

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// AI evaluation noise on/off (default true).
    pub ai_mistakes: bool,
    pub starting_chips: u32,
    pub min_bet: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_mistakes: true,
            starting_chips: 500,
            min_bet: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub ai_mistakes: ValueSource,
    pub starting_chips: ValueSource,
    pub min_bet: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            ai_mistakes: ValueSource::Default,
            starting_chips: ValueSource::Default,
            min_bet: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    ai_mistakes: Option<bool>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    min_bet: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

/// Resolve config, surfacing errors (used by `cfg` for diagnostics).
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HILO_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.ai_mistakes {
            cfg.ai_mistakes = v;
            sources.ai_mistakes = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HILO_SEED") {
        if !seed.is_empty() {
            cfg.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
            );
            sources.seed = ValueSource::Env;
        }
    }
    if let Ok(mistakes) = std::env::var("HILO_AI_MISTAKES") {
        if !mistakes.is_empty() {
            cfg.ai_mistakes = parse_bool(&mistakes)
                .ok_or_else(|| ConfigError::Invalid("Invalid ai_mistakes".into()))?;
            sources.ai_mistakes = ValueSource::Env;
        }
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Resolve config with the settings-store fallback semantics: any read,
/// parse, or validation failure yields the defaults.
pub fn load_or_default() -> Config {
    load_with_sources()
        .map(|resolved| resolved.config)
        .unwrap_or_default()
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_chips == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_chips must be >0".into(),
        ));
    }
    if cfg.min_bet == 0 || cfg.min_bet > cfg.starting_chips {
        return Err(ConfigError::Invalid(
            "Invalid configuration: min_bet must be in 1..=starting_chips".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
