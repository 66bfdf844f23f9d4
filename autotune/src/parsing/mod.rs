//! Parsers for trunked-radio directory data.
//!
//! # Parsers
//!
//! - [`site_directory`]: System and per-site channel data from a JSON export
//!
//! # Example
//!
//! ```no_run
//! use tr_autotune::parsing::{JsonSiteDirectory, SiteDirectory};
//! use std::path::Path;
//!
//! let directory = JsonSiteDirectory::from_file(Path::new("sites.json"))
//!     .expect("Failed to load directory");
//! let sites = directory.sites(&[1, 3]).expect("Failed to select sites");
//! ```

pub mod site_directory;


pub use site_directory::{
    JsonSiteDirectory, Modulation, SiteDirectory, SiteRecord, SystemInfo, SystemType,
};
