use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::core::domain::Hertz;
use crate::error::{AutotuneError, AutotuneResult};

/// Trunking protocol of a radio system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemType {
    Smartnet,
    P25,
}

impl SystemType {
    /// Maps a directory system-type code (`1` SmartNet, `8` P25).
    pub fn from_code(code: i64) -> AutotuneResult<Self> {
        match code {
            1 => Ok(SystemType::Smartnet),
            8 => Ok(SystemType::P25),
            other => Err(AutotuneError::SiteData(format!(
                "Unsupported system type code: {}",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemType::Smartnet => "smartnet",
            SystemType::P25 => "p25",
        }
    }
}

/// Control channel modulation for the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modulation {
    Qpsk,
    Fsk4,
}

impl Modulation {
    pub fn as_str(self) -> &'static str {
        match self {
            Modulation::Qpsk => "qpsk",
            Modulation::Fsk4 => "fsk4",
        }
    }
}

/// System-level metadata from the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub name: String,
    pub system_type: SystemType,
    pub sysid: Option<String>,
}

/// One site's channel data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRecord {
    pub site_number: u32,
    pub frequencies_mhz: Vec<f64>,
    pub control_channels: Vec<Hertz>,
    pub site_modulation: Option<String>,
}

impl SiteRecord {
    /// P25 sites advertising `CPQSK` decode as QPSK; everything else as 4-FSK.
    pub fn modulation(&self, system_type: SystemType) -> Modulation {
        match (system_type, self.site_modulation.as_deref()) {
            (SystemType::P25, Some("CPQSK")) => Modulation::Qpsk,
            _ => Modulation::Fsk4,
        }
    }
}

/// Source of system and site channel data.
pub trait SiteDirectory {
    fn system(&self) -> AutotuneResult<SystemInfo>;

    /// Sites whose number is in `site_numbers`, in directory order.
    /// An empty slice selects every site.
    fn sites(&self, site_numbers: &[u32]) -> AutotuneResult<Vec<SiteRecord>>;
}

/// Custom deserializer that accepts either string or integer for site numbers
fn deserialize_site_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(u32),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => s.trim().parse::<u32>().map_err(D::Error::custom),
        StringOrInt::Int(i) => Ok(i),
    }
}

/// Directory exports carry decimal frequencies either as numbers or as strings
fn deserialize_frequency<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::String(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
        StringOrFloat::Float(f) => Ok(f),
    }
}

/// Raw JSON structure for a system id entry
#[derive(Debug, Deserialize)]
struct RawSysid {
    sysid: String,
}

/// Raw JSON structure for the system block
#[derive(Debug, Deserialize)]
struct RawSystem {
    #[serde(rename = "sName", default)]
    name: String,
    #[serde(rename = "sType")]
    system_type: i64,
    #[serde(default)]
    sysid: Vec<RawSysid>,
}

/// Raw JSON structure for one site frequency
#[derive(Debug, Deserialize)]
struct RawSiteFreq {
    #[serde(deserialize_with = "deserialize_frequency")]
    freq: f64,
    #[serde(rename = "use", default)]
    usage: Option<String>,
}

/// Raw JSON structure for one site
#[derive(Debug, Deserialize)]
struct RawSite {
    #[serde(rename = "siteNumber", deserialize_with = "deserialize_site_number")]
    site_number: u32,
    #[serde(rename = "siteModulation", default)]
    site_modulation: Option<String>,
    #[serde(rename = "siteFreqs", default)]
    site_freqs: Vec<RawSiteFreq>,
}

/// Container for the directory export file
#[derive(Debug, Deserialize)]
struct RawDirectory {
    system: RawSystem,
    sites: Vec<RawSite>,
}

/// Directory backed by a JSON export of system and site data.
#[derive(Debug)]
pub struct JsonSiteDirectory {
    raw: RawDirectory,
}

impl JsonSiteDirectory {
    /// Load a directory export from disk
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site directory: {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse site directory: {}", path.display()))
    }

    /// Parse a directory export from a string
    pub fn from_json_str(json_str: &str) -> AutotuneResult<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(json_str);
        let raw: RawDirectory = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            AutotuneError::SiteData(format!("{} at '{}'", e.inner(), e.path()))
        })?;

        debug!("Loaded site directory with {} sites", raw.sites.len());
        Ok(Self { raw })
    }

    fn convert_site(raw: &RawSite) -> SiteRecord {
        let control_channels = raw
            .site_freqs
            .iter()
            .filter(|f| f.usage.as_deref().map_or(false, |u| !u.is_empty()))
            .map(|f| Hertz::from_mhz(f.freq))
            .collect();

        SiteRecord {
            site_number: raw.site_number,
            frequencies_mhz: raw.site_freqs.iter().map(|f| f.freq).collect(),
            control_channels,
            site_modulation: raw.site_modulation.clone(),
        }
    }
}

impl SiteDirectory for JsonSiteDirectory {
    fn system(&self) -> AutotuneResult<SystemInfo> {
        Ok(SystemInfo {
            name: self.raw.system.name.clone(),
            system_type: SystemType::from_code(self.raw.system.system_type)?,
            sysid: self.raw.system.sysid.first().map(|s| s.sysid.clone()),
        })
    }

    fn sites(&self, site_numbers: &[u32]) -> AutotuneResult<Vec<SiteRecord>> {
        let selected: Vec<SiteRecord> = self
            .raw
            .sites
            .iter()
            .filter(|s| site_numbers.is_empty() || site_numbers.contains(&s.site_number))
            .map(Self::convert_site)
            .collect();

        for number in site_numbers {
            if !selected.iter().any(|s| s.site_number == *number) {
                warn!("Site {} not found in directory", number);
            }
        }

        Ok(selected)
    }
}
