//! Game configuration: defaults, then an optional TOML file, then command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use rand::{rngs::SmallRng, SeedableRng};
use serde::Deserialize;

use crate::{
    controller::{GameController, Timings},
    game::{Difficulty, DEFAULT_CUPS},
    Error, Result,
};

/// The most cups a game can have, so every one gets a number key.
pub const MAX_CUPS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How many cups, from 2 to [`MAX_CUPS`].
    pub cups: usize,
    /// The difficulty selected at startup.
    pub difficulty: Difficulty,
    /// Fixed seed for every random choice. Unset means a fresh seed every run.
    pub seed: Option<u64>,
    /// How long the ball is shown before shuffling, in milliseconds.
    pub reveal_ms: u64,
    /// How long a guess's result is shown before the replay prompt, in milliseconds.
    pub reset_ms: u64,
    /// Where to write logs. Unset means no logs at all.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let timings = Timings::default();
        Self {
            cups: DEFAULT_CUPS,
            difficulty: Difficulty::default(),
            seed: None,
            reveal_ms: timings.reveal.as_millis() as u64,
            reset_ms: timings.reset.as_millis() as u64,
            log_file: None,
        }
    }
}

impl Config {
    /// Parse a config from TOML text. `path` is only used for error messages.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_CUPS).contains(&self.cups) {
            return Err(Error::InvalidConfig(
                format!("cups must be between 2 and {}, got {}", MAX_CUPS, self.cups).into(),
            ));
        }
        if self.reveal_ms == 0 {
            return Err(Error::InvalidConfig("reveal_ms must be nonzero".into()));
        }
        if self.reset_ms == 0 {
            return Err(Error::InvalidConfig("reset_ms must be nonzero".into()));
        }
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            reveal: Duration::from_millis(self.reveal_ms),
            reset: Duration::from_millis(self.reset_ms),
        }
    }

    /// The RNG games should use: seeded if [`Self::seed`] is set, otherwise from entropy.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// An idle controller set up according to this config.
    pub fn controller(&self) -> GameController<SmallRng> {
        GameController::new(self.cups, self.difficulty, self.rng()).with_timings(self.timings())
    }
}

/// Command-line flags shared by every binary, layered over the config file.
#[derive(Debug, Default, clap::Args)]
pub struct ConfigArgs {
    /// TOML config file to load
    #[arg(long, env = "SHELLGAME_CONFIG")]
    pub config: Option<PathBuf>,
    /// Number of cups
    #[arg(long)]
    pub cups: Option<usize>,
    /// Starting difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,
    /// Fixed RNG seed, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write logs to; filter with RUST_LOG
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ConfigArgs {
    /// Build the final, validated config.
    pub fn resolve(self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Override whatever's in `config` with the flags that were actually passed.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(cups) = self.cups {
            config.cups = cups;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        config
    }
}
