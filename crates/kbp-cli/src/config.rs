//! YAML configuration.
//!
//! ```yaml
//! device: "Marion Lang:ml8_9:::61:ff60"
//! log_filter: "kbp_client=debug,info"
//! ```

use std::path::Path;

use kbp_device::DeviceQuery;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Settings read from the `--config` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KbpConfig {
    /// Device query used when `--device` is not given.
    pub device: Option<String>,
    /// `tracing` filter directive used when neither `RUST_LOG` nor `-v` is set.
    pub log_filter: Option<String>,
}

impl KbpConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse config from a YAML string. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CliError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Pick the device query: the command-line flag, then the config file,
    /// then the QMK raw HID interface of any device.
    pub fn device_query(&self, flag: Option<&str>) -> Result<DeviceQuery, CliError> {
        match flag.or(self.device.as_deref()) {
            Some(query) => Ok(query.parse()?),
            None => Ok(DeviceQuery::raw_hid_interface()),
        }
    }
}
