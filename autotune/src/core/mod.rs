//! Core domain models for radio allocation.
//!
//! This module defines the data structures shared by every pipeline stage:
//! canonical hertz values, normalized frequency sets and per-radio records.

pub mod domain;

pub use domain::{AllocationResult, CoverageEstimate, FrequencySet, Hertz, RadioAllocation};
