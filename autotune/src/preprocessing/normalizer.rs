//! Raw MHz channel lists to canonical frequency sets.

use log::debug;

use crate::core::domain::{FrequencySet, Hertz};
use crate::error::{AutotuneError, AutotuneResult};

/// Turns an unordered MHz channel list into a [`FrequencySet`].
///
/// Values are sorted by their raw MHz value, scaled to hertz (rounded to
/// four places, then truncated to a whole hertz) and deduplicated.
///
/// # Examples
///
/// ```
/// use tr_autotune::preprocessing::FrequencyNormalizer;
///
/// let set = FrequencyNormalizer::normalize(&[851.4625, 851.0125, 851.0125]).unwrap();
/// let hz: Vec<i64> = set.iter().map(|f| f.value()).collect();
/// assert_eq!(hz, vec![851_012_500, 851_462_500]);
/// ```
pub struct FrequencyNormalizer;

impl FrequencyNormalizer {
    /// Normalizes a raw MHz list.
    ///
    /// # Errors
    ///
    /// [`AutotuneError::InputValidation`] when the list is empty or holds a
    /// non-finite or non-positive value, or one that scales outside
    /// `(0, Hertz::MAX]` hertz.
    pub fn normalize(raw_mhz: &[f64]) -> AutotuneResult<FrequencySet> {
        if raw_mhz.is_empty() {
            return Err(AutotuneError::InputValidation(
                "no channel frequencies supplied".to_string(),
            ));
        }

        if let Some(bad) = raw_mhz.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(AutotuneError::InputValidation(format!(
                "invalid channel frequency: {} MHz",
                bad
            )));
        }

        let mut sorted = raw_mhz.to_vec();
        sorted.sort_by(f64::total_cmp);

        if let Some(bad) = sorted.iter().find(|&&f| {
            let hz = Hertz::from_mhz(f);
            hz <= Hertz::ZERO || hz > Hertz::MAX
        }) {
            return Err(AutotuneError::InputValidation(format!(
                "channel frequency {} MHz is outside the supported range (up to {})",
                bad,
                Hertz::MAX
            )));
        }

        let mut frequencies: Vec<Hertz> = sorted.into_iter().map(Hertz::from_mhz).collect();
        let before = frequencies.len();
        frequencies.dedup();

        if frequencies.len() != before {
            debug!(
                "Dropped {} duplicate channel frequencies",
                before - frequencies.len()
            );
        }

        FrequencySet::from_sorted(frequencies)
    }
}
