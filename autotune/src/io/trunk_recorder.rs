//! Trunk-recorder configuration records.
//!
//! Each output record is an immutable value built by its own builder. The
//! builders start from the documented defaults and are `Clone`, so a
//! template configured once per run can be stamped out per radio or site.

use serde::{Deserialize, Serialize};

use crate::core::domain::{AllocationResult, Hertz};
use crate::parsing::site_directory::{SiteRecord, SystemInfo};

/// Schema version written to the `ver` field.
pub const CONFIG_VERSION: u32 = 2;

/// One SDR source entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    center: i64,
    rate: i64,
    ppm: i32,
    gain: i32,
    agc: bool,
    digital_levels: u32,
    digital_recorders: usize,
    analog_recorders: usize,
    driver: String,
    device: String,
}

impl SourceConfig {
    pub fn center(&self) -> Hertz {
        Hertz::new(self.center)
    }

    pub fn rate(&self) -> Hertz {
        Hertz::new(self.rate)
    }

    pub fn digital_recorders(&self) -> usize {
        self.digital_recorders
    }

    pub fn gain(&self) -> i32 {
        self.gain
    }

    pub fn analog_recorders(&self) -> usize {
        self.analog_recorders
    }
}

/// Builder for [`SourceConfig`].
///
/// | field              | default          |
/// |--------------------|------------------|
/// | `center`           | 0                |
/// | `rate`             | 2_048_000 Hz     |
/// | `ppm`              | 0                |
/// | `gain`             | 49               |
/// | `agc`              | false            |
/// | `digital_levels`   | 1                |
/// | `digital_recorders`| 4                |
/// | `analog_recorders` | 0                |
/// | `driver`           | `osmosdr`        |
/// | `device`           | `rtl=00000101`   |
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfigBuilder {
    inner: SourceConfig,
}

impl SourceConfigBuilder {
    pub fn new() -> Self {
        Self {
            inner: SourceConfig {
                center: 0,
                rate: 2_048_000,
                ppm: 0,
                gain: 49,
                agc: false,
                digital_levels: 1,
                digital_recorders: 4,
                analog_recorders: 0,
                driver: "osmosdr".to_string(),
                device: "rtl=00000101".to_string(),
            },
        }
    }

    pub fn center(mut self, center: Hertz) -> Self {
        self.inner.center = center.value();
        self
    }

    pub fn rate(mut self, rate: Hertz) -> Self {
        self.inner.rate = rate.value();
        self
    }

    pub fn ppm(mut self, ppm: i32) -> Self {
        self.inner.ppm = ppm;
        self
    }

    pub fn gain(mut self, gain: i32) -> Self {
        self.inner.gain = gain;
        self
    }

    pub fn agc(mut self, agc: bool) -> Self {
        self.inner.agc = agc;
        self
    }

    pub fn digital_levels(mut self, levels: u32) -> Self {
        self.inner.digital_levels = levels;
        self
    }

    pub fn digital_recorders(mut self, recorders: usize) -> Self {
        self.inner.digital_recorders = recorders;
        self
    }

    pub fn analog_recorders(mut self, recorders: usize) -> Self {
        self.inner.analog_recorders = recorders;
        self
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.inner.driver = driver.into();
        self
    }

    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.inner.device = device.into();
        self
    }

    pub fn build(self) -> SourceConfig {
        self.inner
    }
}

impl Default for SourceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One trunked system entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    #[serde(rename = "control_channels")]
    control_channels: Vec<i64>,
    #[serde(rename = "type")]
    system_type: String,
    digital_levels: u32,
    talkgroups_file: String,
    short_name: String,
    modulation: String,
    hide_encrypted: bool,
    upload_script: String,
    talkgroup_display_format: String,
    compress_wav: bool,
}

impl SystemConfig {
    pub fn control_channels(&self) -> &[i64] {
        &self.control_channels
    }

    pub fn system_type(&self) -> &str {
        &self.system_type
    }

    pub fn modulation(&self) -> &str {
        &self.modulation
    }

    pub fn talkgroups_file(&self) -> &str {
        &self.talkgroups_file
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn hide_encrypted(&self) -> bool {
        self.hide_encrypted
    }
}

/// Builder for [`SystemConfig`].
///
/// Defaults: no control channels, empty `type`, `modulation`,
/// `talkgroupsFile`, `shortName` and `uploadScript`, `digitalLevels` 1,
/// `hideEncrypted` false, `talkgroupDisplayFormat` `id_tag`,
/// `compressWav` false.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfigBuilder {
    inner: SystemConfig,
}

impl SystemConfigBuilder {
    pub fn new() -> Self {
        Self {
            inner: SystemConfig {
                control_channels: Vec::new(),
                system_type: String::new(),
                digital_levels: 1,
                talkgroups_file: String::new(),
                short_name: String::new(),
                modulation: String::new(),
                hide_encrypted: false,
                upload_script: String::new(),
                talkgroup_display_format: "id_tag".to_string(),
                compress_wav: false,
            },
        }
    }

    pub fn control_channels(mut self, channels: impl IntoIterator<Item = Hertz>) -> Self {
        self.inner
            .control_channels
            .extend(channels.into_iter().map(Hertz::value));
        self
    }

    pub fn system_type(mut self, system_type: impl Into<String>) -> Self {
        self.inner.system_type = system_type.into();
        self
    }

    pub fn modulation(mut self, modulation: impl Into<String>) -> Self {
        self.inner.modulation = modulation.into();
        self
    }

    pub fn talkgroups_file(mut self, path: impl Into<String>) -> Self {
        self.inner.talkgroups_file = path.into();
        self
    }

    pub fn short_name(mut self, name: impl Into<String>) -> Self {
        self.inner.short_name = name.into();
        self
    }

    pub fn hide_encrypted(mut self, hide: bool) -> Self {
        self.inner.hide_encrypted = hide;
        self
    }

    pub fn build(self) -> SystemConfig {
        self.inner
    }
}

impl Default for SystemConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete configuration document for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrunkRecorderConfig {
    ver: u32,
    sources: Vec<SourceConfig>,
    systems: Vec<SystemConfig>,
    capture_dir: String,
    log_level: String,
    broadcast_signals: bool,
    frequency_format: String,
}

impl TrunkRecorderConfig {
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn systems(&self) -> &[SystemConfig] {
        &self.systems
    }
}

/// Builder for [`TrunkRecorderConfig`].
///
/// Defaults: `ver` 2, empty `captureDir`, `logLevel` `info`,
/// `broadcastSignals` true, `frequencyFormat` `mhz`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkRecorderConfigBuilder {
    inner: TrunkRecorderConfig,
}

impl TrunkRecorderConfigBuilder {
    pub fn new() -> Self {
        Self {
            inner: TrunkRecorderConfig {
                ver: CONFIG_VERSION,
                sources: Vec::new(),
                systems: Vec::new(),
                capture_dir: String::new(),
                log_level: "info".to_string(),
                broadcast_signals: true,
                frequency_format: "mhz".to_string(),
            },
        }
    }

    pub fn capture_dir(mut self, dir: impl Into<String>) -> Self {
        self.inner.capture_dir = dir.into();
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.inner.log_level = level.into();
        self
    }

    pub fn broadcast_signals(mut self, enabled: bool) -> Self {
        self.inner.broadcast_signals = enabled;
        self
    }

    pub fn source(mut self, source: SourceConfig) -> Self {
        self.inner.sources.push(source);
        self
    }

    pub fn system(mut self, system: SystemConfig) -> Self {
        self.inner.systems.push(system);
        self
    }

    pub fn build(self) -> TrunkRecorderConfig {
        self.inner
    }
}

impl Default for TrunkRecorderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the document for one site: a source per radio, one system entry.
///
/// `source_template` supplies rate, gain, ppm, agc and device settings;
/// center and digital recorder count come from each radio. Type, modulation
/// and control channels come from the directory, the rest of the system
/// entry from `system_template`.
pub fn site_config(
    allocation: &AllocationResult,
    site: &SiteRecord,
    system: &SystemInfo,
    source_template: &SourceConfigBuilder,
    system_template: &SystemConfigBuilder,
    document_template: &TrunkRecorderConfigBuilder,
) -> TrunkRecorderConfig {
    let mut document = document_template.clone();

    for radio in allocation.iter() {
        document = document.source(
            source_template
                .clone()
                .center(radio.center)
                .digital_recorders(radio.channel_count)
                .build(),
        );
    }

    document
        .system(
            system_template
                .clone()
                .system_type(system.system_type.as_str())
                .modulation(site.modulation(system.system_type).as_str())
                .control_channels(site.control_channels.iter().copied())
                .build(),
        )
        .build()
}
