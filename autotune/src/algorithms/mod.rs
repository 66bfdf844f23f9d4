//! Radio allocation algorithms.
//!
//! This module packs a normalized frequency set into receiver windows and
//! places a tuning center inside each window.
//!
//! # Components
//!
//! - [`allocator`]: Greedy single-pass window packing
//! - [`center`]: Interference-aware center placement
//!
//! # Example
//!
//! ```
//! use tr_autotune::algorithms::RadioAllocator;
//! use tr_autotune::core::domain::Hertz;
//! use tr_autotune::preprocessing::FrequencyNormalizer;
//!
//! let set = FrequencyNormalizer::normalize(&[851.0125, 860.0125]).unwrap();
//! let allocator = RadioAllocator::new(Hertz::new(2_048_000), Hertz::new(12_500)).unwrap();
//! assert_eq!(allocator.allocate(&set).radio_count(), 2);
//! ```

pub mod allocator;
pub mod center;

pub use allocator::RadioAllocator;
pub use center::{CenterCalculator, CenterPlacement, INTERFERENCE_OFFSET};
