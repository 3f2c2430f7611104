//! Layered CLI configuration: built-in defaults, then a TOML file named by
//! `DRAWPOKER_CONFIG`, then `DRAWPOKER_*` environment variables. Command
//! flags are applied by each handler on top of the resolved values.

use serde::{Deserialize, Serialize};
use std::fs;

use drawpoker_engine::rules::{MAX_BET, MIN_BET};
use drawpoker_engine::session::{DEFAULT_MAX_ROUNDS, DEFAULT_STARTING_CREDITS, SessionConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub starting_credits: u32,
    /// Rounds per session; 0 plays until the bankroll runs out
    pub max_rounds: u32,
    pub bet: u32,
    /// Pause between revealed cards in interactive play
    pub deal_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub starting_credits: ValueSource,
    pub max_rounds: ValueSource,
    pub bet: ValueSource,
    pub deal_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            starting_credits: ValueSource::Default,
            max_rounds: ValueSource::Default,
            bet: ValueSource::Default,
            deal_delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            starting_credits: DEFAULT_STARTING_CREDITS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            bet: MIN_BET,
            deal_delay_ms: 0,
        }
    }
}

impl Config {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            starting_credits: self.starting_credits,
            max_rounds: (self.max_rounds > 0).then_some(self.max_rounds),
        }
    }
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
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("DRAWPOKER_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.starting_credits {
            cfg.starting_credits = v;
            sources.starting_credits = ValueSource::File;
        }
        if let Some(v) = f.max_rounds {
            cfg.max_rounds = v;
            sources.max_rounds = ValueSource::File;
        }
        if let Some(v) = f.bet {
            cfg.bet = v;
            sources.bet = ValueSource::File;
        }
        if let Some(v) = f.deal_delay_ms {
            cfg.deal_delay_ms = v;
            sources.deal_delay_ms = ValueSource::File;
        }
    }

    if let Some(v) = env_value("DRAWPOKER_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("DRAWPOKER_CREDITS")? {
        cfg.starting_credits = v;
        sources.starting_credits = ValueSource::Env;
    }
    if let Some(v) = env_value("DRAWPOKER_ROUNDS")? {
        cfg.max_rounds = v;
        sources.max_rounds = ValueSource::Env;
    }
    if let Some(v) = env_value("DRAWPOKER_BET")? {
        cfg.bet = v;
        sources.bet = ValueSource::Env;
    }
    if let Some(v) = env_value("DRAWPOKER_DEAL_DELAY_MS")? {
        cfg.deal_delay_ms = v;
        sources.deal_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {}", key, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    starting_credits: Option<u32>,
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    bet: Option<u32>,
    #[serde(default)]
    deal_delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_credits == 0 {
        return Err(ConfigError::Invalid(
            "starting_credits must be >0".into(),
        ));
    }
    if !(MIN_BET..=MAX_BET).contains(&cfg.bet) {
        return Err(ConfigError::Invalid(format!(
            "bet must be between {} and {}",
            MIN_BET, MAX_BET
        )));
    }
    Ok(())
}
