//! CLI configuration: defaults → config file → `NODECTL_*` env → command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:4646";
const ENV_PREFIX: &str = "NODECTL_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the cluster management API.
    pub address: String,
    pub region: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            region: None,
            token: None,
            timeout_secs: 30,
            log_level: "warn".to_string(),
        }
    }
}

/// Connection options given on the command line. Unset fields leave the
/// lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("nodectl").join("config.yaml"))
    }
}

/// Load the layered configuration. An explicit `config_file` must exist; the
/// default location is optional.
pub fn load(config_file: Option<&Path>, overrides: &CliOverrides) -> Result<Config> {
    let figment = Figment::from(Serialized::defaults(Config::default()));

    let figment = match config_file {
        Some(path) => figment.merge(Yaml::file_exact(path)),
        None => match Config::path() {
            Ok(path) => figment.merge(Yaml::file(path)),
            Err(_) => figment,
        },
    };

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .context("loading nodectl configuration")
}
