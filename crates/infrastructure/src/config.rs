use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use domain::connection::{DEFAULT_PREFIX, DeviceProfile, IdentityOverride, IdentityTable};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    #[serde(default = "default_overrides")]
    pub overrides: Vec<IdentityOverride>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
            overrides: default_overrides(),
        }
    }
}

impl IdentityConfig {
    pub fn table(&self) -> IdentityTable {
        IdentityTable::new(self.default_prefix.clone(), self.overrides.clone())
    }
}

/// Device facts that take precedence over what the probe reports.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DeviceConfig {
    pub sdk_int: Option<u32>,
    pub soc_model: Option<String>,
}

impl DeviceConfig {
    pub fn merge_into(&self, mut probed: DeviceProfile) -> DeviceProfile {
        if self.sdk_int.is_some() {
            probed.sdk_int = self.sdk_int;
        }
        if self.soc_model.is_some() {
            probed.soc_model = self.soc_model.clone();
        }
        probed
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BridgeConfig {
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
fn default_overrides() -> Vec<IdentityOverride> {
    IdentityTable::builtin_overrides()
}
fn default_reconnect_delay_ms() -> u64 {
    2000
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: default_reconnect_delay_ms(),
            identity: IdentityConfig::default(),
            device: DeviceConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl BridgeConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Local config file, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Run mode specific overrides
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. NYX__RECONNECT_DELAY_MS=500)
            .add_source(Environment::with_prefix("NYX").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}
