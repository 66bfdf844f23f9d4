use serde::Serialize;

use crate::core::domain::Hertz;

/// Half-width of the zone around each channel that a tuner center must avoid,
/// and the distance a colliding center is moved up by.
pub const INTERFERENCE_OFFSET: Hertz = Hertz::new(10_000);

/// Center frequency chosen for one radio window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CenterPlacement {
    pub center: Hertz,
    pub shifted: bool,
}

/// Computes tuning centers for radio windows.
pub struct CenterCalculator;

impl CenterCalculator {
    /// Midpoint of `[low, high]`, moved up once by [`INTERFERENCE_OFFSET`]
    /// when it lands within that distance (inclusive) of any channel in
    /// `all_channels`.
    ///
    /// The midpoint uses floor division on whole hertz. The shifted value is
    /// not checked again.
    ///
    /// # Examples
    ///
    /// ```
    /// use tr_autotune::algorithms::CenterCalculator;
    /// use tr_autotune::core::domain::Hertz;
    ///
    /// let channels = [Hertz::new(1_000_000)];
    /// let placement = CenterCalculator::calculate(
    ///     Hertz::new(900_000),
    ///     Hertz::new(1_100_000),
    ///     &channels,
    /// );
    /// assert!(placement.shifted);
    /// assert_eq!(placement.center, Hertz::new(1_010_000));
    /// ```
    pub fn calculate(low: Hertz, high: Hertz, all_channels: &[Hertz]) -> CenterPlacement {
        let midpoint = Hertz::new((low.value() + high.value()).div_euclid(2));

        if Self::collides(midpoint, all_channels) {
            CenterPlacement {
                center: midpoint + INTERFERENCE_OFFSET,
                shifted: true,
            }
        } else {
            CenterPlacement {
                center: midpoint,
                shifted: false,
            }
        }
    }

    /// Whether `center` lies inside any channel's interference zone.
    pub fn collides(center: Hertz, all_channels: &[Hertz]) -> bool {
        all_channels
            .iter()
            .any(|&f| center.distance(f) <= INTERFERENCE_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hz(values: &[i64]) -> Vec<Hertz> {
        values.iter().copied().map(Hertz::new).collect()
    }

    #[test]
    fn test_midpoint_without_collision() {
        let channels = hz(&[851_012_500, 851_462_500]);
        let placement =
            CenterCalculator::calculate(Hertz::new(851_006_250), Hertz::new(851_462_500), &channels);
        assert!(!placement.shifted);
        assert_eq!(placement.center, Hertz::new(851_234_375));
    }

    #[test]
    fn test_shift_when_near_channel() {
        let channels = hz(&[851_012_500, 851_237_500, 851_462_500]);
        let placement =
            CenterCalculator::calculate(Hertz::new(851_006_250), Hertz::new(851_462_500), &channels);
        assert!(placement.shifted);
        assert_eq!(placement.center, Hertz::new(851_244_375));
    }

    #[test]
    fn test_zone_edges_are_inclusive() {
        let channels = hz(&[1_000_000]);
        assert!(CenterCalculator::collides(Hertz::new(990_000), &channels));
        assert!(CenterCalculator::collides(Hertz::new(1_010_000), &channels));
        assert!(!CenterCalculator::collides(Hertz::new(1_010_001), &channels));
        assert!(!CenterCalculator::collides(Hertz::new(989_999), &channels));
    }

    #[test]
    fn test_channels_outside_window_still_count() {
        // Only the neighbouring radio's channel sits near this midpoint.
        let channels = hz(&[500_000, 2_004_000]);
        let placement =
            CenterCalculator::calculate(Hertz::new(0), Hertz::new(4_000_000), &channels);
        assert!(placement.shifted);
        assert_eq!(placement.center, Hertz::new(2_010_000));
    }

    #[test]
    fn test_single_shift_is_not_revalidated() {
        // Shifted center lands exactly on another channel.
        let channels = hz(&[1_000_000, 1_010_000]);
        let placement =
            CenterCalculator::calculate(Hertz::new(999_000), Hertz::new(1_001_000), &channels);
        assert!(placement.shifted);
        assert_eq!(placement.center, Hertz::new(1_010_000));
        assert!(CenterCalculator::collides(placement.center, &channels));
    }

    #[test]
    fn test_odd_sum_rounds_down() {
        let placement = CenterCalculator::calculate(Hertz::new(0), Hertz::new(100_001), &[]);
        assert_eq!(placement.center, Hertz::new(50_000));
    }
}
