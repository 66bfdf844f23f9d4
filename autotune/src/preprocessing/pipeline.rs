use log::info;
use serde::Serialize;

use crate::algorithms::RadioAllocator;
use crate::core::domain::{AllocationResult, FrequencySet, Hertz};
use crate::error::AutotuneResult;
use crate::preprocessing::normalizer::FrequencyNormalizer;
use crate::preprocessing::validator::{CoverageReport, CoverageValidator};

/// Default SDR sample rate, which is also the per-radio capacity (MHz).
pub const DEFAULT_CAPACITY_MHZ: f64 = 2.048;

/// Default channel bandwidth reserved around each channel (kHz).
pub const DEFAULT_GUARD_KHZ: f64 = 12.5;

/// Result of running the pipeline for one site
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub frequencies: FrequencySet,
    pub allocation: AllocationResult,
    pub report: CoverageReport,
}

/// Bandwidth settings for the allocation pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationConfig {
    pub capacity_bandwidth: Hertz,
    pub guard_width: Hertz,
}

impl AllocationConfig {
    /// Builds a config from a capacity in MHz and a guard width in kHz.
    pub fn from_units(capacity_mhz: f64, guard_khz: f64) -> Self {
        Self {
            capacity_bandwidth: Hertz::from_mhz(capacity_mhz),
            guard_width: Hertz::from_khz(guard_khz),
        }
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self::from_units(DEFAULT_CAPACITY_MHZ, DEFAULT_GUARD_KHZ)
    }
}

/// Normalize, allocate and validate one site's channel list
pub struct AutotunePipeline {
    config: AllocationConfig,
}

impl AutotunePipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: AllocationConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: AllocationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Run every stage on a raw MHz channel list
    ///
    /// # Arguments
    /// * `raw_mhz` - Channel frequencies for one site, any order
    ///
    /// # Returns
    /// PipelineResult with the normalized set, allocation and coverage report
    pub fn run(&self, raw_mhz: &[f64]) -> AutotuneResult<PipelineResult> {
        // Step 1: Bandwidth settings are checked before any allocation work
        let allocator =
            RadioAllocator::new(self.config.capacity_bandwidth, self.config.guard_width)?;

        // Step 2: Normalize
        let frequencies = FrequencyNormalizer::normalize(raw_mhz)?;

        // Step 3: Allocate
        let allocation = allocator.allocate(&frequencies);

        // Step 4: Validate
        let report = CoverageValidator::validate(&allocation)?;

        info!(
            "Allocated {} channels to {} radios",
            frequencies.len(),
            allocation.radio_count()
        );

        Ok(PipelineResult {
            frequencies,
            allocation,
            report,
        })
    }
}

impl Default for AutotunePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to allocate one site's channels
pub fn allocate_site(
    raw_mhz: &[f64],
    capacity_mhz: f64,
    guard_khz: f64,
) -> AutotuneResult<PipelineResult> {
    let pipeline = AutotunePipeline::with_config(AllocationConfig::from_units(capacity_mhz, guard_khz));
    pipeline.run(raw_mhz)
}
