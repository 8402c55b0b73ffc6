use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on `trials_per_block`; larger values are treated as typos.
pub const MAX_TRIALS_PER_BLOCK: u32 = 10_000;

/// Operator-tunable session settings, read from `config.json`.
///
/// Every field has a default, so an empty object (or no file at all) gives
/// the standard two blocks of 100 trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_trials_per_block")]
    pub trials_per_block: u32,

    /// Key name that dismisses a message screen.
    #[serde(default = "default_continue_key")]
    pub continue_key: String,

    /// Machine image shown at the start of every trial.
    #[serde(default = "default_image")]
    pub image: PathBuf,

    /// Directory the session log is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixed seed for block order and rewards. `None` draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_gender_choices")]
    pub gender_choices: Vec<String>,
}

fn default_trials_per_block() -> u32 {
    100
}

fn default_continue_key() -> String {
    "space".to_string()
}

fn default_image() -> PathBuf {
    PathBuf::from("image.png")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_gender_choices() -> Vec<String> {
    vec!["female".to_string(), "male".to_string(), "other".to_string()]
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trials_per_block: default_trials_per_block(),
            continue_key: default_continue_key(),
            image: default_image(),
            output_dir: default_output_dir(),
            seed: None,
            gender_choices: default_gender_choices(),
        }
    }
}

impl SessionConfig {
    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(SessionError::io(path, e)),
        };
        let cfg = Self::from_json(&raw)
            .map_err(|e| SessionError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(cfg)
    }

    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let cfg: Self =
            serde_json::from_str(raw).map_err(|e| SessionError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.trials_per_block == 0 {
            return Err(SessionError::Config(
                "trials_per_block must be at least 1".to_string(),
            ));
        }
        if self.trials_per_block > MAX_TRIALS_PER_BLOCK {
            return Err(SessionError::Config(format!(
                "trials_per_block {} exceeds {}",
                self.trials_per_block, MAX_TRIALS_PER_BLOCK
            )));
        }
        if self.continue_key.trim().is_empty() {
            return Err(SessionError::Config("continue_key is empty".to_string()));
        }
        if self.continue_key == "left" || self.continue_key == "right" {
            return Err(SessionError::Config(format!(
                "continue_key {:?} collides with a choice key",
                self.continue_key
            )));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
