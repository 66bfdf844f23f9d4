//! Configuration output for trunk-recorder.
//!
//! This module builds the per-site configuration document from an
//! allocation and writes it to disk.
//!
//! # Example
//!
//! ```no_run
//! use tr_autotune::io::trunk_recorder::TrunkRecorderConfigBuilder;
//! use tr_autotune::io::writer::write_site_config;
//! use std::path::Path;
//!
//! let config = TrunkRecorderConfigBuilder::new().build();
//! let path = write_site_config(Path::new("configs"), 1, "6643", &config)
//!     .expect("Failed to write config");
//! println!("Wrote {}", path.display());
//! ```

pub mod trunk_recorder;
pub mod writer;

#[cfg(test)]
mod writer_tests;

pub use trunk_recorder::{
    site_config, SourceConfig, SourceConfigBuilder, SystemConfig, SystemConfigBuilder,
    TrunkRecorderConfig, TrunkRecorderConfigBuilder,
};
pub use writer::{config_file_name, to_pretty_json, write_site_config};
