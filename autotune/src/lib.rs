//! Trunked-radio SDR autotuning.
//!
//! Packs a site's channel frequencies into the fewest fixed-bandwidth SDR
//! windows, places a tuning center in each window away from the channels,
//! and emits a trunk-recorder configuration with one source per radio.
//!
//! ```
//! use tr_autotune::preprocessing::AutotunePipeline;
//!
//! let result = AutotunePipeline::new()
//!     .run(&[851.0125, 851.2375, 851.4625])
//!     .unwrap();
//! assert_eq!(result.allocation.radio_count(), 1);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod units;

pub use error::{AutotuneError, AutotuneResult};
