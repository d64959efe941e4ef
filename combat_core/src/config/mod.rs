//! Configuration - Tunable constants and the static game data set

mod constants;
mod data;

pub use constants::{
    CombatConstants, GameConstants, GenerationConstants, PlayerConstants, ProgressionConstants,
    RewardConstants,
};
pub use data::{GameData, IntegrityIssue};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A data file that could not be used. Never raised for drifted
/// cross-references; those go into the integrity report instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid constants: {0}")]
    Validation(String),
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_named(&path.display().to_string(), &content)
}

/// Deserialize TOML held in memory
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse_named("inline toml", content)
}

/// Deserialize TOML, naming `origin` in the error
pub(crate) fn parse_named<T: DeserializeOwned>(origin: &str, content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}
