//! Domain models for channel frequencies and per-radio allocations.
//!
//! This module provides the data structures passed between the pipeline
//! stages: the canonical [`Hertz`] value, the normalized [`FrequencySet`],
//! one [`RadioAllocation`] per receiver and the [`AllocationResult`] that
//! owns them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{AutotuneError, AutotuneResult};
use crate::units::{self, Multiplier};

/// A frequency in whole hertz.
///
/// All comparisons inside the allocator happen in this unit so that MHz and
/// kHz inputs never meet each other directly.
///
/// # Examples
///
/// ```
/// use tr_autotune::core::domain::Hertz;
///
/// let f = Hertz::from_mhz(851.0125);
/// assert_eq!(f.value(), 851_012_500);
/// assert_eq!(f.to_string(), "851.0125 MHz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hertz(i64);

impl Hertz {
    pub const ZERO: Hertz = Hertz(0);

    /// Highest value accepted for a channel or a bandwidth (1 THz).
    ///
    /// Window arithmetic adds at most a bandwidth to a channel, so every
    /// intermediate stays far inside `i64`.
    pub const MAX: Hertz = Hertz(1_000_000_000_000);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Converts a fractional MHz value, truncating to a whole hertz.
    pub fn from_mhz(mhz: f64) -> Self {
        Self(units::mhz_to_hz(mhz))
    }

    /// Converts a fractional kHz value, truncating to a whole hertz.
    pub fn from_khz(khz: f64) -> Self {
        Self(units::khz_to_hz(khz))
    }

    pub fn to_mhz(self) -> f64 {
        units::hz_to_mhz(self.0)
    }

    /// Absolute distance between two frequencies.
    pub fn distance(self, other: Hertz) -> Hertz {
        Hertz((self.0 - other.0).abs())
    }
}

impl Add for Hertz {
    type Output = Hertz;

    fn add(self, rhs: Hertz) -> Hertz {
        Hertz(self.0 + rhs.0)
    }
}

impl Sub for Hertz {
    type Output = Hertz;

    fn sub(self, rhs: Hertz) -> Hertz {
        Hertz(self.0 - rhs.0)
    }
}

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            units::scale_down(self.0 as f64, Multiplier::Mega),
            Multiplier::Mega
        )
    }
}

/// Ascending, duplicate-free, non-empty sequence of channel frequencies.
///
/// Built by [`FrequencyNormalizer`](crate::preprocessing::FrequencyNormalizer)
/// or by [`FrequencySet::from_sorted`], which checks the ordering invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencySet(Vec<Hertz>);

impl FrequencySet {
    /// Wraps an already sorted sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AutotuneError::InputValidation`] if the sequence is empty,
    /// not strictly increasing, or holds a value outside `(0, Hertz::MAX]`.
    pub fn from_sorted(frequencies: Vec<Hertz>) -> AutotuneResult<Self> {
        if frequencies.is_empty() {
            return Err(AutotuneError::InputValidation(
                "frequency set must not be empty".to_string(),
            ));
        }
        if let Some(bad) = frequencies
            .iter()
            .find(|&&f| f <= Hertz::ZERO || f > Hertz::MAX)
        {
            return Err(AutotuneError::InputValidation(format!(
                "frequency {} Hz is outside the supported range",
                bad.value()
            )));
        }
        if let Some(pair) = frequencies.windows(2).find(|w| w[0] >= w[1]) {
            return Err(AutotuneError::InputValidation(format!(
                "frequencies must be strictly increasing: {} followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self(frequencies))
    }

    pub fn as_slice(&self) -> &[Hertz] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Hertz {
        self.0[0]
    }

    pub fn last(&self) -> Hertz {
        self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hertz> {
        self.0.iter()
    }
}

/// One receiver's share of the site.
///
/// # Fields
///
/// * `index` - 1-based position of the radio in the allocation
/// * `low` - window floor (first channel minus half the guard width)
/// * `high` - highest channel assigned to this radio
/// * `center` - tuning point, possibly shifted away from a channel
/// * `channels` - assigned channels, ascending
/// * `channel_count` - `channels.len()`
/// * `center_shifted` - whether the interference shift was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioAllocation {
    pub index: usize,
    pub low: Hertz,
    pub high: Hertz,
    pub center: Hertz,
    pub channels: Vec<Hertz>,
    pub channel_count: usize,
    pub center_shifted: bool,
}

impl RadioAllocation {
    /// Occupied span from the window floor to the highest channel.
    pub fn span(&self) -> Hertz {
        self.high - self.low
    }

    /// Whether at least one assigned channel falls inside `[low, high]`.
    pub fn has_channel_within_bounds(&self) -> bool {
        self.channels
            .iter()
            .any(|&f| self.low <= f && f <= self.high)
    }

    /// Whether every assigned channel falls inside `[low, high]`.
    ///
    /// Stronger than [`has_channel_within_bounds`](Self::has_channel_within_bounds);
    /// the allocator guarantees it by construction.
    pub fn all_channels_within_bounds(&self) -> bool {
        self.channels
            .iter()
            .all(|&f| self.low <= f && f <= self.high)
    }

    pub fn center_within_bounds(&self) -> bool {
        self.low <= self.center && self.center <= self.high
    }
}

/// Coarse radio-count estimate from the total span of the site.
///
/// Diagnostic only: the greedy pass never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageEstimate {
    pub lower_edge: Hertz,
    pub upper_edge: Hertz,
    pub total_bandwidth: Hertz,
    pub estimated_radios: usize,
    pub leftover_bandwidth: Hertz,
}

/// Ordered radio allocations for one frequency set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub radios: Vec<RadioAllocation>,
    pub capacity_bandwidth: Hertz,
    pub guard_width: Hertz,
    pub estimate: CoverageEstimate,
}

impl AllocationResult {
    pub fn radio_count(&self) -> usize {
        self.radios.len()
    }

    pub fn total_channels(&self) -> usize {
        self.radios.iter().map(|r| r.channel_count).sum()
    }

    /// Looks up a radio by its 1-based index.
    pub fn radio(&self, index: usize) -> Option<&RadioAllocation> {
        index.checked_sub(1).and_then(|i| self.radios.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RadioAllocation> {
        self.radios.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hz(values: &[i64]) -> Vec<Hertz> {
        values.iter().copied().map(Hertz::new).collect()
    }

    #[test]
    fn hertz_conversions_and_display() {
        assert_eq!(Hertz::from_mhz(851.2375).value(), 851_237_500);
        assert_eq!(Hertz::from_khz(12.5).value(), 12_500);
        assert_eq!(Hertz::new(2_048_000).to_mhz(), 2.048);
        assert_eq!(Hertz::new(851_462_500).to_string(), "851.4625 MHz");
        assert_eq!(Hertz::new(10).distance(Hertz::new(4)), Hertz::new(6));
    }

    #[test]
    fn frequency_set_rejects_empty_and_unsorted() {
        assert!(matches!(
            FrequencySet::from_sorted(vec![]),
            Err(AutotuneError::InputValidation(_))
        ));
        assert!(FrequencySet::from_sorted(hz(&[3, 2])).is_err());
        assert!(FrequencySet::from_sorted(hz(&[2, 2])).is_err());

        let set = FrequencySet::from_sorted(hz(&[1, 5, 9])).unwrap();
        assert_eq!(set.first(), Hertz::new(1));
        assert_eq!(set.last(), Hertz::new(9));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn frequency_set_rejects_out_of_range_values() {
        assert!(FrequencySet::from_sorted(hz(&[0, 5])).is_err());
        assert!(FrequencySet::from_sorted(hz(&[-5, 5])).is_err());
        assert!(FrequencySet::from_sorted(vec![Hertz::new(5), Hertz::new(i64::MAX)]).is_err());
        assert!(FrequencySet::from_sorted(vec![Hertz::MAX]).is_ok());
    }

    #[test]
    fn radio_bounds_helpers() {
        let radio = RadioAllocation {
            index: 1,
            low: Hertz::new(100),
            high: Hertz::new(200),
            center: Hertz::new(210),
            channels: hz(&[150, 250]),
            channel_count: 2,
            center_shifted: true,
        };
        assert!(radio.has_channel_within_bounds());
        assert!(!radio.all_channels_within_bounds());
        assert!(!radio.center_within_bounds());
        assert_eq!(radio.span(), Hertz::new(100));
    }

    #[test]
    fn allocation_lookup_is_one_based() {
        let estimate = CoverageEstimate {
            lower_edge: Hertz::ZERO,
            upper_edge: Hertz::ZERO,
            total_bandwidth: Hertz::ZERO,
            estimated_radios: 1,
            leftover_bandwidth: Hertz::ZERO,
        };
        let result = AllocationResult {
            radios: vec![RadioAllocation {
                index: 1,
                low: Hertz::new(0),
                high: Hertz::new(10),
                center: Hertz::new(5),
                channels: hz(&[10]),
                channel_count: 1,
                center_shifted: false,
            }],
            capacity_bandwidth: Hertz::new(100),
            guard_width: Hertz::new(2),
            estimate,
        };
        assert!(result.radio(0).is_none());
        assert_eq!(result.radio(1).map(|r| r.index), Some(1));
        assert_eq!(result.total_channels(), 1);
    }
}
