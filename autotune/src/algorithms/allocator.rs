use log::{debug, info};

use crate::algorithms::center::CenterCalculator;
use crate::core::domain::{AllocationResult, CoverageEstimate, FrequencySet, Hertz, RadioAllocation};
use crate::error::{AutotuneError, AutotuneResult};

/// Greedy single-pass packer of channel frequencies into radio windows.
///
/// Each window opens half a guard width below the lowest unassigned channel
/// and admits every following channel strictly below `anchor + capacity`.
/// The number of radios is whatever the scan produces.
///
/// # Examples
///
/// ```
/// use tr_autotune::algorithms::RadioAllocator;
/// use tr_autotune::core::domain::Hertz;
/// use tr_autotune::preprocessing::FrequencyNormalizer;
///
/// let set = FrequencyNormalizer::normalize(&[851.0125, 851.2375, 851.4625]).unwrap();
/// let allocator = RadioAllocator::new(Hertz::new(2_048_000), Hertz::new(12_500)).unwrap();
/// let result = allocator.allocate(&set);
///
/// assert_eq!(result.radio_count(), 1);
/// assert_eq!(result.radios[0].low, Hertz::new(851_006_250));
/// assert_eq!(result.radios[0].channel_count, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioAllocator {
    capacity_bandwidth: Hertz,
    guard_width: Hertz,
}

impl RadioAllocator {
    /// Creates an allocator for one capacity bandwidth and guard width.
    ///
    /// # Errors
    ///
    /// [`AutotuneError::InputValidation`] if the guard width is not positive,
    /// the capacity bandwidth does not exceed it, or the capacity is above
    /// [`Hertz::MAX`].
    pub fn new(capacity_bandwidth: Hertz, guard_width: Hertz) -> AutotuneResult<Self> {
        if guard_width <= Hertz::ZERO {
            return Err(AutotuneError::InputValidation(format!(
                "guard width must be positive, got {} Hz",
                guard_width.value()
            )));
        }
        if capacity_bandwidth > Hertz::MAX {
            return Err(AutotuneError::InputValidation(format!(
                "capacity bandwidth ({} Hz) exceeds the supported range",
                capacity_bandwidth.value()
            )));
        }
        if capacity_bandwidth <= guard_width {
            return Err(AutotuneError::InputValidation(format!(
                "capacity bandwidth ({} Hz) must exceed guard width ({} Hz)",
                capacity_bandwidth.value(),
                guard_width.value()
            )));
        }
        Ok(Self {
            capacity_bandwidth,
            guard_width,
        })
    }

    pub fn capacity_bandwidth(&self) -> Hertz {
        self.capacity_bandwidth
    }

    pub fn guard_width(&self) -> Hertz {
        self.guard_width
    }

    /// Half the guard width, rounded up to a whole hertz.
    pub fn half_guard(&self) -> Hertz {
        Hertz::new((self.guard_width.value() + 1) / 2)
    }

    /// Radio-count estimate from the span of the whole set plus a guard
    /// band on each end.
    pub fn estimate(&self, frequencies: &FrequencySet) -> CoverageEstimate {
        let half = self.half_guard();
        let lower_edge = frequencies.first() - half;
        let upper_edge = frequencies.last() + half;
        let total_bandwidth = (upper_edge + half) - (lower_edge - half);

        let capacity = self.capacity_bandwidth.value();
        let estimated_radios = (total_bandwidth.value() + capacity - 1) / capacity;
        let leftover_bandwidth = Hertz::new(capacity * estimated_radios) - total_bandwidth;

        CoverageEstimate {
            lower_edge,
            upper_edge,
            total_bandwidth,
            estimated_radios: estimated_radios as usize,
            leftover_bandwidth,
        }
    }

    /// Partitions the set into radio windows.
    pub fn allocate(&self, frequencies: &FrequencySet) -> AllocationResult {
        let estimate = self.estimate(frequencies);
        debug!(
            "Lowest {} (limit {}), highest {} (limit {})",
            frequencies.first(),
            estimate.lower_edge,
            frequencies.last(),
            estimate.upper_edge
        );
        debug!(
            "Bandwidth to cover {}, leftover SDR bandwidth {}, estimated radios {}",
            estimate.total_bandwidth, estimate.leftover_bandwidth, estimate.estimated_radios
        );

        let all = frequencies.as_slice();
        let half = self.half_guard();
        let mut radios: Vec<RadioAllocation> = Vec::new();
        let mut next = 0;

        while next < all.len() {
            let anchor = all[next] - half;
            let ceiling = anchor + self.capacity_bandwidth;
            let start = next;

            while next < all.len() && all[next] > anchor && all[next] < ceiling {
                next += 1;
            }

            let channels = all[start..next].to_vec();
            let high = all[next - 1];
            let placement = CenterCalculator::calculate(anchor, high, all);

            debug!(
                "Radio {}: {} channels, low {}, high {}, center {}",
                radios.len() + 1,
                channels.len(),
                anchor,
                high,
                placement.center
            );

            radios.push(RadioAllocation {
                index: radios.len() + 1,
                low: anchor,
                high,
                center: placement.center,
                channel_count: channels.len(),
                channels,
                center_shifted: placement.shifted,
            });
        }

        if radios.len() != estimate.estimated_radios {
            info!(
                "Greedy pass used {} radios, span estimate was {}",
                radios.len(),
                estimate.estimated_radios
            );
        }

        AllocationResult {
            radios,
            capacity_bandwidth: self.capacity_bandwidth,
            guard_width: self.guard_width,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[i64]) -> FrequencySet {
        FrequencySet::from_sorted(values.iter().copied().map(Hertz::new).collect()).unwrap()
    }

    fn default_allocator() -> RadioAllocator {
        RadioAllocator::new(Hertz::new(2_048_000), Hertz::new(12_500)).unwrap()
    }

    #[test]
    fn test_rejects_capacity_not_above_guard() {
        assert!(RadioAllocator::new(Hertz::new(12_500), Hertz::new(12_500)).is_err());
        assert!(RadioAllocator::new(Hertz::new(10_000), Hertz::new(12_500)).is_err());
        assert!(RadioAllocator::new(Hertz::new(10_000), Hertz::ZERO).is_err());
    }

    #[test]
    fn test_rejects_unbounded_capacity() {
        // An infinite sample rate saturates to i64::MAX
        let err = RadioAllocator::new(Hertz::from_mhz(f64::INFINITY), Hertz::new(12_500))
            .unwrap_err();
        assert!(matches!(err, AutotuneError::InputValidation(_)));
        assert!(RadioAllocator::new(Hertz::MAX, Hertz::new(12_500)).is_ok());
    }

    #[test]
    fn test_half_guard_rounds_up() {
        assert_eq!(default_allocator().half_guard(), Hertz::new(6_250));
        let odd = RadioAllocator::new(Hertz::new(100), Hertz::new(1)).unwrap();
        assert_eq!(odd.half_guard(), Hertz::new(1));
    }

    #[test]
    fn test_single_frequency_single_radio() {
        let result = default_allocator().allocate(&set(&[460_500_000]));
        assert_eq!(result.radio_count(), 1);
        let radio = &result.radios[0];
        assert_eq!(radio.index, 1);
        assert_eq!(radio.channels, vec![Hertz::new(460_500_000)]);
        assert_eq!(radio.low, Hertz::new(460_493_750));
        assert_eq!(radio.high, Hertz::new(460_500_000));
    }

    #[test]
    fn test_three_channel_example() {
        let result = default_allocator().allocate(&set(&[851_012_500, 851_237_500, 851_462_500]));
        assert_eq!(result.radio_count(), 1);
        let radio = &result.radios[0];
        assert_eq!(radio.channel_count, 3);
        assert_eq!(radio.low, Hertz::new(851_006_250));
        assert_eq!(radio.high, Hertz::new(851_462_500));
        // midpoint 851_234_375 is 3_125 Hz from 851_237_500
        assert!(radio.center_shifted);
        assert_eq!(radio.center, Hertz::new(851_244_375));
    }

    #[test]
    fn test_two_clusters_two_radios() {
        let result = default_allocator().allocate(&set(&[
            851_012_500,
            851_100_000,
            851_200_000,
            860_012_500,
            860_300_000,
        ]));
        assert_eq!(result.radio_count(), 2);
        assert_eq!(result.radios[0].channel_count, 3);
        assert_eq!(result.radios[1].channel_count, 2);
        assert_eq!(result.radios[1].index, 2);
        assert_eq!(result.radios[1].low, Hertz::new(860_006_250));
        assert!(result.radios[0]
            .channels
            .iter()
            .all(|f| !result.radios[1].channels.contains(f)));
    }

    #[test]
    fn test_window_closes_strictly_below_ceiling() {
        // second channel sits exactly on anchor + capacity
        let allocator = RadioAllocator::new(Hertz::new(1_000), Hertz::new(100)).unwrap();
        let result = allocator.allocate(&set(&[10_000, 10_950, 10_951]));
        assert_eq!(result.radio_count(), 2);
        assert_eq!(result.radios[0].channels, vec![Hertz::new(10_000)]);
        assert_eq!(
            result.radios[1].channels,
            vec![Hertz::new(10_950), Hertz::new(10_951)]
        );
    }

    #[test]
    fn test_estimate_is_diagnostic_only() {
        let allocator = default_allocator();
        let frequencies = set(&[851_012_500, 851_237_500, 851_462_500]);
        let estimate = allocator.estimate(&frequencies);
        // span 450_000 + 4 * 6_250
        assert_eq!(estimate.total_bandwidth, Hertz::new(475_000));
        assert_eq!(estimate.estimated_radios, 1);
        assert_eq!(estimate.leftover_bandwidth, Hertz::new(1_573_000));
        assert_eq!(allocator.allocate(&frequencies).estimate, estimate);
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let frequencies = set(&[769_006_250, 769_256_250, 771_106_250, 772_906_250]);
        let allocator = default_allocator();
        assert_eq!(allocator.allocate(&frequencies), allocator.allocate(&frequencies));
    }
}
