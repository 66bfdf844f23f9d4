use log::info;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AutotuneResult;
use crate::io::trunk_recorder::TrunkRecorderConfig;

/// Indentation used for emitted documents.
const INDENT: &[u8] = b"    ";

/// File name for one site's document: `{site}.{system}.config.json`.
pub fn config_file_name(site_number: u32, system_id: &str) -> String {
    format!("{}.{}.config.json", site_number, system_id)
}

/// Serialize with four-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> AutotuneResult<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Write a site document into `output_dir`, creating the directory if needed.
///
/// # Returns
/// Path of the written file
pub fn write_site_config(
    output_dir: &Path,
    site_number: u32,
    system_id: &str,
    config: &TrunkRecorderConfig,
) -> AutotuneResult<PathBuf> {
    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir)?;
    }

    let path = output_dir.join(config_file_name(site_number, system_id));
    fs::write(&path, to_pretty_json(config)?)?;

    info!("Wrote config - {}", path.display());
    Ok(path)
}
