use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
// Older deployments set the data directory under this name.
const LEGACY_DATA_DIR_VAR: &str = "EXERCIZE_TRACKER_DATA_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `activities.json` and `activities-history.json`.
    pub data_dir: PathBuf,
    pub port: u16,
    /// Reject marking the same type/id twice on one day.
    pub reject_duplicates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
            reject_duplicates: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let data_dir = lookup("APP_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .or_else(|| lookup(LEGACY_DATA_DIR_VAR).filter(|dir| !dir.trim().is_empty()));
        if let Some(dir) = data_dir {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
        }

        if let Some(flag) = lookup("REJECT_DUPLICATES") {
            config.reject_duplicates = parse_flag(&flag).ok_or(ConfigError::Invalid {
                name: "REJECT_DUPLICATES",
                value: flag.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
