//! tr-autotune command-line entry point.
//!
//! Reads a site directory export, allocates each requested site's channels
//! to SDR radios and writes one trunk-recorder config per site.
//!
//! # Usage
//!
//! ```bash
//! tr-autotune --directory sites.json --system 6643 --sites 1 3 \
//!     --sdr-sample-rate 2.4 --output-dir configs
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter when `--log-level` is not given (default: info)

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tr_autotune::config::AutotuneConfig;
use tr_autotune::io::{site_config, to_pretty_json, write_site_config};
use tr_autotune::parsing::{JsonSiteDirectory, SiteDirectory, SiteRecord, SystemInfo};
use tr_autotune::preprocessing::AutotunePipeline;
use tr_autotune::AutotuneError;

/// Generate trunk-recorder configs from trunked-radio site data
#[derive(Parser, Debug)]
#[command(name = "tr-autotune")]
#[command(author, version, about = "Generate trunk-recorder configs from site directory data")]
struct Cli {
    /// Site directory export (JSON)
    #[arg(short, long)]
    directory: PathBuf,

    /// Sites to generate configs for, space separated
    #[arg(short, long, num_args = 1.., required = true)]
    sites: Vec<u32>,

    /// System identifier used in output file names
    #[arg(long)]
    system: String,

    /// TOML configuration file (default: search for autotune.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The sample rate of the SDRs in MHz
    #[arg(long)]
    sdr_sample_rate: Option<f64>,

    /// The SDR gain value
    #[arg(short = 'g', long)]
    sdr_gain_value: Option<i32>,

    /// The SDR PPM value
    #[arg(long)]
    sdr_ppm_value: Option<i32>,

    /// Enable SDR AGC
    #[arg(long)]
    sdr_agc: bool,

    /// The bandwidth of the channels in kHz
    #[arg(long)]
    spectrum_bandwidth: Option<f64>,

    /// The directory to place the configs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print configs to stdout instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AutotuneConfig> {
        let mut config = match &self.config {
            Some(path) => AutotuneConfig::from_file(path)?,
            None => AutotuneConfig::from_default_location()?.unwrap_or_default(),
        };

        if let Some(rate) = self.sdr_sample_rate {
            config.radio.sample_rate_mhz = rate;
        }
        if let Some(gain) = self.sdr_gain_value {
            config.radio.gain = gain;
        }
        if let Some(ppm) = self.sdr_ppm_value {
            config.radio.ppm = ppm;
        }
        if self.sdr_agc {
            config.radio.agc = true;
        }
        if let Some(bandwidth) = self.spectrum_bandwidth {
            config.channel.spectrum_bandwidth_khz = bandwidth;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn process_site(
    site: &SiteRecord,
    system: &SystemInfo,
    config: &AutotuneConfig,
    system_id: &str,
    dry_run: bool,
) -> anyhow::Result<Option<PathBuf>> {
    let pipeline = AutotunePipeline::with_config(config.allocation_config());
    let result = pipeline
        .run(&site.frequencies_mhz)
        .with_context(|| format!("Allocation failed for site {}", site.site_number))?;

    let document = site_config(
        &result.allocation,
        site,
        system,
        &config.source_template(),
        &config.system_template(),
        &config.document_template(),
    );

    if dry_run {
        println!("{}", to_pretty_json(&document)?);
        return Ok(None);
    }

    let path = write_site_config(
        Path::new(&config.output.directory),
        site.site_number,
        system_id,
        &document,
    )
    .with_context(|| format!("Failed to write config for site {}", site.site_number))?;

    Ok(Some(path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = cli.load_config()?;
    let directory = JsonSiteDirectory::from_file(&cli.directory)?;
    let system = directory.system()?;
    let sites = directory.sites(&cli.sites)?;

    if sites.is_empty() {
        anyhow::bail!("None of the requested sites {:?} exist in the directory", cli.sites);
    }

    info!(
        "Processing {} sites of {} system '{}'",
        sites.len(),
        system.system_type.as_str(),
        system.name
    );

    let mut failures = 0;
    for site in &sites {
        if let Err(e) = process_site(site, &system, &config, &cli.system, cli.dry_run) {
            failures += 1;
            let allocation_failed = e
                .downcast_ref::<AutotuneError>()
                .map_or(false, AutotuneError::is_allocation_failure);
            if allocation_failed {
                error!("Site {} skipped, no usable allocation: {:#}", site.site_number, e);
            } else {
                error!("Site {}: {:#}", site.site_number, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} sites failed", failures, sites.len());
    }

    Ok(())
}
