pub mod normalizer;
pub mod pipeline;
pub mod validator;

pub use normalizer::FrequencyNormalizer;
pub use pipeline::{allocate_site, AllocationConfig, AutotunePipeline, PipelineResult};
pub use validator::{CoverageReport, CoverageStats, CoverageValidator};
