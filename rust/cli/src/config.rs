use serde::{Deserialize, Serialize};
use std::fs;

/// Table session settings. House rules are fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_cash: u32,
    pub seed: Option<u64>,
    pub max_players: usize,
    pub max_rounds: Option<u32>,
    pub min_bet: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_cash: ValueSource,
    pub seed: ValueSource,
    pub max_players: ValueSource,
    pub max_rounds: ValueSource,
    pub min_bet: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_cash: ValueSource::Default,
            seed: ValueSource::Default,
            max_players: ValueSource::Default,
            max_rounds: ValueSource::Default,
            min_bet: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl ConfigResolved {
    /// Applies command-line flags, the highest precedence layer.
    pub fn with_overrides(mut self, seed: Option<u64>, max_rounds: Option<u32>) -> Result<Self, ConfigError> {
        if let Some(seed) = seed {
            self.config.seed = Some(seed);
            self.sources.seed = ValueSource::Cli;
        }
        if let Some(rounds) = max_rounds {
            self.config.max_rounds = Some(rounds);
            self.sources.max_rounds = ValueSource::Cli;
        }
        validate(&self.config)?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_cash: blackjack_engine::player::STARTING_CASH,
            seed: None,
            max_players: 4,
            max_rounds: None,
            min_bet: 1,
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

/// Resolves default < `BLACKJACK_CONFIG` file < `BLACKJACK_*` env vars.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLACKJACK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_cash {
            cfg.starting_cash = v;
            sources.starting_cash = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.max_players {
            cfg.max_players = v;
            sources.max_players = ValueSource::File;
        }
        if let Some(v) = f.max_rounds {
            cfg.max_rounds = Some(v);
            sources.max_rounds = ValueSource::File;
        }
        if let Some(v) = f.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("BLACKJACK_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(cash) = std::env::var("BLACKJACK_STARTING_CASH")
        && !cash.is_empty()
    {
        cfg.starting_cash = cash
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting cash".into()))?;
        sources.starting_cash = ValueSource::Env;
    }
    if let Ok(rounds) = std::env::var("BLACKJACK_MAX_ROUNDS")
        && !rounds.is_empty()
    {
        cfg.max_rounds = Some(
            rounds
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid max rounds".into()))?,
        );
        sources.max_rounds = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_cash: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    max_players: Option<usize>,
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    min_bet: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_cash == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_cash must be >0".into(),
        ));
    }
    if !(1..=7).contains(&cfg.max_players) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_players must be between 1 and 7".into(),
        ));
    }
    if cfg.max_rounds == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_rounds must be >=1".into(),
        ));
    }
    if cfg.min_bet == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: min_bet must be >=1".into(),
        ));
    }
    Ok(())
}
