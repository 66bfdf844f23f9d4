//! Run configuration file support.
//!
//! This module reads radio, channel and output defaults from a TOML file.
//! Every table and key is optional; missing values take the defaults below,
//! and command-line flags override whatever the file sets.
//!
//! ```toml
//! [radio]
//! sample_rate_mhz = 2.048
//! gain = 49
//! ppm = 0
//! agc = false
//! driver = "osmosdr"
//! device = "rtl=00000101"
//! analog_recorders = 0
//!
//! [channel]
//! spectrum_bandwidth_khz = 12.5
//!
//! [system]
//! talkgroups_file = "talkgroups.csv"
//! short_name = "county"
//! hide_encrypted = false
//!
//! [output]
//! directory = "configs"
//! capture_dir = "/var/lib/trunk-recorder"
//! log_level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::Hertz;
use crate::error::{AutotuneError, AutotuneResult};
use crate::algorithms::RadioAllocator;
use crate::io::trunk_recorder::{
    SourceConfigBuilder, SystemConfigBuilder, TrunkRecorderConfigBuilder,
};
use crate::preprocessing::pipeline::{AllocationConfig, DEFAULT_CAPACITY_MHZ, DEFAULT_GUARD_KHZ};

/// Default configuration file name searched by [`AutotuneConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "autotune.toml";

/// Configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutotuneConfig {
    #[serde(default)]
    pub radio: RadioSettings,
    #[serde(default)]
    pub channel: ChannelSettings,
    #[serde(default)]
    pub system: SystemSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// SDR settings shared by every radio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioSettings {
    #[serde(default = "default_sample_rate_mhz")]
    pub sample_rate_mhz: f64,
    #[serde(default = "default_gain")]
    pub gain: i32,
    #[serde(default)]
    pub ppm: i32,
    #[serde(default)]
    pub agc: bool,
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_digital_levels")]
    pub digital_levels: u32,
    #[serde(default)]
    pub analog_recorders: usize,
}

/// Channel bandwidth settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettings {
    #[serde(default = "default_spectrum_bandwidth_khz")]
    pub spectrum_bandwidth_khz: f64,
}

/// Settings copied into every system entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    #[serde(default)]
    pub talkgroups_file: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub hide_encrypted: bool,
}

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub directory: PathBuf,
    #[serde(default)]
    pub capture_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_broadcast_signals")]
    pub broadcast_signals: bool,
}

fn default_sample_rate_mhz() -> f64 {
    DEFAULT_CAPACITY_MHZ
}

fn default_gain() -> i32 {
    49
}

fn default_driver() -> String {
    "osmosdr".to_string()
}

fn default_device() -> String {
    "rtl=00000101".to_string()
}

fn default_digital_levels() -> u32 {
    1
}

fn default_spectrum_bandwidth_khz() -> f64 {
    DEFAULT_GUARD_KHZ
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_broadcast_signals() -> bool {
    true
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            sample_rate_mhz: default_sample_rate_mhz(),
            gain: default_gain(),
            ppm: 0,
            agc: false,
            driver: default_driver(),
            device: default_device(),
            digital_levels: default_digital_levels(),
            analog_recorders: 0,
        }
    }
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            spectrum_bandwidth_khz: default_spectrum_bandwidth_khz(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            capture_dir: String::new(),
            log_level: default_log_level(),
            broadcast_signals: default_broadcast_signals(),
        }
    }
}

impl AutotuneConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AutotuneConfig)` if successful
    /// * `Err(AutotuneError::Configuration)` if the file cannot be read, parsed or is invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> AutotuneResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AutotuneError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> AutotuneResult<Self> {
        let config: AutotuneConfig = toml::from_str(content).map_err(|e| {
            AutotuneError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `autotune.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(config))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in any location
    pub fn from_default_location() -> AutotuneResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("config").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Check value ranges that TOML types alone cannot express.
    ///
    /// The sample rate must also exceed the channel bandwidth and stay
    /// within [`Hertz::MAX`].
    pub fn validate(&self) -> AutotuneResult<()> {
        if !self.radio.sample_rate_mhz.is_finite() || self.radio.sample_rate_mhz <= 0.0 {
            return Err(AutotuneError::Configuration(format!(
                "radio.sample_rate_mhz must be positive, got {}",
                self.radio.sample_rate_mhz
            )));
        }
        if !self.channel.spectrum_bandwidth_khz.is_finite()
            || self.channel.spectrum_bandwidth_khz <= 0.0
        {
            return Err(AutotuneError::Configuration(format!(
                "channel.spectrum_bandwidth_khz must be positive, got {}",
                self.channel.spectrum_bandwidth_khz
            )));
        }

        let allocation = self.allocation_config();
        RadioAllocator::new(allocation.capacity_bandwidth, allocation.guard_width).map_err(
            |e| {
                AutotuneError::Configuration(format!(
                    "radio.sample_rate_mhz = {} with channel.spectrum_bandwidth_khz = {}: {}",
                    self.radio.sample_rate_mhz, self.channel.spectrum_bandwidth_khz, e
                ))
            },
        )?;
        Ok(())
    }

    /// Capacity and guard in hertz for the allocation pipeline.
    pub fn allocation_config(&self) -> AllocationConfig {
        AllocationConfig::from_units(self.radio.sample_rate_mhz, self.channel.spectrum_bandwidth_khz)
    }

    /// Source template carrying every per-run SDR setting.
    pub fn source_template(&self) -> SourceConfigBuilder {
        SourceConfigBuilder::new()
            .rate(Hertz::from_mhz(self.radio.sample_rate_mhz))
            .gain(self.radio.gain)
            .ppm(self.radio.ppm)
            .agc(self.radio.agc)
            .driver(self.radio.driver.clone())
            .device(self.radio.device.clone())
            .digital_levels(self.radio.digital_levels)
            .analog_recorders(self.radio.analog_recorders)
    }

    /// System template carrying the `[system]` table.
    pub fn system_template(&self) -> SystemConfigBuilder {
        SystemConfigBuilder::new()
            .talkgroups_file(self.system.talkgroups_file.clone())
            .short_name(self.system.short_name.clone())
            .hide_encrypted(self.system.hide_encrypted)
    }

    /// Document template carrying the output settings.
    pub fn document_template(&self) -> TrunkRecorderConfigBuilder {
        TrunkRecorderConfigBuilder::new()
            .capture_dir(self.output.capture_dir.clone())
            .log_level(self.output.log_level.clone())
            .broadcast_signals(self.output.broadcast_signals)
    }
}
