//! Unit scaling between hertz and the decimal multiples used on the wire.
//!
//! The canonical unit is the hertz. A [`Multiplier`] carries the ratio from
//! its unit to hertz, the same way a unit marker carries a `RATIO` to the
//! canonical unit of its dimension.
//!
//! Every conversion rounds to [`DECIMAL_PLACES`] fractional digits so that
//! repeated conversions do not accumulate floating-point drift.
//!
//! ```rust
//! use tr_autotune::units::{scale_down, scale_up, Multiplier};
//!
//! assert_eq!(scale_up(851.0125, Multiplier::Mega), 851_012_500.0);
//! assert_eq!(scale_down(12_500.0, Multiplier::Kilo), 12.5);
//! ```

use std::fmt;

/// Number of fractional digits kept by every conversion.
pub const DECIMAL_PLACES: i32 = 4;

/// Decimal multiple of the hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplier {
    /// `1 kHz = 1_000 Hz`
    Kilo,
    /// `1 MHz = 1_000_000 Hz`
    Mega,
}

impl Multiplier {
    /// Unit-to-hertz conversion factor.
    pub const fn ratio(self) -> f64 {
        match self {
            Multiplier::Kilo => 1_000.0,
            Multiplier::Mega => 1_000_000.0,
        }
    }

    /// Printable symbol of the scaled unit.
    pub const fn symbol(self) -> &'static str {
        match self {
            Multiplier::Kilo => "kHz",
            Multiplier::Mega => "MHz",
        }
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rounds to [`DECIMAL_PLACES`] fractional digits, half away from zero.
pub fn round_to_places(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMAL_PLACES);
    (value * factor).round() / factor
}

/// Divides by the multiplier (e.g. Hz to MHz).
pub fn scale_down(value: f64, multiplier: Multiplier) -> f64 {
    round_to_places(value / multiplier.ratio())
}

/// Multiplies by the multiplier (e.g. MHz to Hz).
pub fn scale_up(value: f64, multiplier: Multiplier) -> f64 {
    round_to_places(value * multiplier.ratio())
}

/// MHz to hertz, truncated to a whole hertz.
pub fn mhz_to_hz(mhz: f64) -> i64 {
    scale_up(mhz, Multiplier::Mega) as i64
}

/// kHz to hertz, truncated to a whole hertz.
pub fn khz_to_hz(khz: f64) -> i64 {
    scale_up(khz, Multiplier::Kilo) as i64
}

/// Hertz to MHz, rounded to four places.
pub fn hz_to_mhz(hz: i64) -> f64 {
    scale_down(hz as f64, Multiplier::Mega)
}
