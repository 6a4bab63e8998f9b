//! Configuration and seed data.
//!
//! Configuration comes from environment variables with defaults. Seed data
//! is JSON, either from the file named in the configuration or the built-in
//! demo set.

use crate::ride::RideDetails;
use crate::service::NewUser;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const LOG_ENV: &str = "CARPOOL_LOG";
pub const SEED_FILE_ENV: &str = "CARPOOL_SEED_FILE";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    SeedParse(#[from] serde_json::Error),

    #[error("Invalid log filter '{filter}': {message}")]
    LogFilter { filter: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Telemetry(String),
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing` filter directive, e.g. `info` or `carpool=debug`.
    pub log_filter: String,
    /// JSON seed file; the demo seed is used when absent.
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            log_filter: read(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            seed_file: read(SEED_FILE_ENV).map(PathBuf::from),
        }
    }

    /// # Errors
    ///
    /// `SeedRead` if the seed file cannot be read, `SeedParse` if it is
    /// not valid seed JSON.
    pub fn load_seed(&self) -> Result<SeedData, ConfigError> {
        match &self.seed_file {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
                    path: path.clone(),
                    source,
                })?;
                SeedData::from_json(&raw)
            }
            None => Ok(SeedData::demo()),
        }
    }
}

/// Users and rides to load at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub rides: Vec<SeedRide>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRide {
    pub driver: String,
    #[serde(flatten)]
    pub details: RideDetails,
    #[serde(default)]
    pub requests: Vec<SeedRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRequest {
    pub participant: String,
    pub destination: String,
    pub occupied_spaces: u32,
    /// Accept the request right after it is made.
    #[serde(default)]
    pub accepted: bool,
}

impl SeedData {
    /// # Errors
    ///
    /// `SeedParse` if `raw` is not valid seed JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// One driver, one passenger and one four-seat ride with a pending
    /// single-seat request.
    pub fn demo() -> Self {
        Self {
            users: vec![
                NewUser {
                    alias: "jperez".to_string(),
                    name: "Juan Perez".to_string(),
                    car_plate: Some("ABC123".to_string()),
                },
                NewUser {
                    alias: "lgomez".to_string(),
                    name: "Luis Gomez".to_string(),
                    car_plate: None,
                },
            ],
            rides: vec![SeedRide {
                driver: "jperez".to_string(),
                details: RideDetails {
                    ride_date_and_time: "2025/07/15 22:00".to_string(),
                    final_address: "Av Javier Prado 456, San Borja".to_string(),
                    available_spaces: 4,
                },
                requests: vec![SeedRequest {
                    participant: "lgomez".to_string(),
                    destination: "Av Aramburú 245, Surquillo".to_string(),
                    occupied_spaces: 1,
                    accepted: false,
                }],
            }],
        }
    }
}
