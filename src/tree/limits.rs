//! Interval limits used to decide which chords are shown.

use serde::{Deserialize, Serialize};

/// Bounds on a chord's intervals, each independently switchable.
///
/// "Individual" bounds apply to every interval between neighbouring notes,
/// "combined" bounds to the span from the lowest to the highest note. All
/// bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Smallest allowed interval between neighbouring notes
    pub min_individual: i64,
    /// Whether `min_individual` is checked
    pub min_individual_enabled: bool,
    /// Largest allowed interval between neighbouring notes
    pub max_individual: i64,
    /// Whether `max_individual` is checked
    pub max_individual_enabled: bool,
    /// Smallest allowed span
    pub min_combined: i64,
    /// Whether `min_combined` is checked
    pub min_combined_enabled: bool,
    /// Largest allowed span
    pub max_combined: i64,
    /// Whether `max_combined` is checked
    pub max_combined_enabled: bool,
}

impl Limits {
    /// True when no bound is switched on.
    pub fn is_unbounded(&self) -> bool {
        !(self.min_individual_enabled
            || self.max_individual_enabled
            || self.min_combined_enabled
            || self.max_combined_enabled)
    }

    /// Checks a chord against the enabled bounds.
    ///
    /// Intervals are measured in `i128`, so any pair of `i64` pitches has an
    /// exact distance.
    pub fn admits(&self, chord: &[i64]) -> bool {
        let span = match (chord.first(), chord.last()) {
            (Some(&first), Some(&last)) => interval(first, last),
            _ => 0,
        };
        if self.min_combined_enabled && span < i128::from(self.min_combined) {
            return false;
        }
        if self.max_combined_enabled && span > i128::from(self.max_combined) {
            return false;
        }

        chord.windows(2).map(|w| interval(w[0], w[1])).all(|delta| {
            !(self.min_individual_enabled && delta < i128::from(self.min_individual))
                && !(self.max_individual_enabled && delta > i128::from(self.max_individual))
        })
    }
}

fn interval(from: i64, to: i64) -> i128 {
    i128::from(to) - i128::from(from)
}

/// `None` admits every chord; otherwise see [`Limits::admits`].
pub fn within_limits(chord: &[i64], limits: Option<&Limits>) -> bool {
    limits.map_or(true, |limits| limits.admits(chord))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_limits() {
        assert!(within_limits(&[7, 10, 14], None));
        assert!(within_limits(&[], None));
        assert!(within_limits(&[0, 100], Some(&Limits::default())));
        assert!(Limits::default().is_unbounded());
    }

    #[test]
    fn test_combined_span() {
        let limits = Limits {
            max_combined: 6,
            max_combined_enabled: true,
            ..Limits::default()
        };
        assert!(!within_limits(&[7, 10, 14], Some(&limits)));
        assert!(within_limits(&[7, 10, 13], Some(&limits)));

        let limits = Limits {
            min_combined: 8,
            min_combined_enabled: true,
            ..Limits::default()
        };
        assert!(!within_limits(&[0, 3, 7], Some(&limits)));
        assert!(within_limits(&[0, 4, 8], Some(&limits)));
    }

    #[test]
    fn test_individual_intervals() {
        let limits = Limits {
            min_individual: 2,
            min_individual_enabled: true,
            max_individual: 5,
            max_individual_enabled: true,
            ..Limits::default()
        };
        assert!(within_limits(&[0, 2, 7], Some(&limits)));
        assert!(!within_limits(&[0, 1, 5], Some(&limits)));
        assert!(!within_limits(&[0, 4, 10], Some(&limits)));
        assert!(within_limits(&[3], Some(&limits)));
    }

    #[test]
    fn test_disabled_bounds_are_ignored() {
        let limits = Limits {
            max_combined: 1,
            min_individual: 50,
            ..Limits::default()
        };
        assert!(within_limits(&[0, 7, 19], Some(&limits)));
    }

    #[test]
    fn test_extreme_pitches() {
        let limits = Limits {
            max_combined: 10,
            max_combined_enabled: true,
            ..Limits::default()
        };
        assert!(!within_limits(&[i64::MIN, i64::MAX], Some(&limits)));
        assert!(within_limits(&[i64::MAX - 3, i64::MAX], Some(&limits)));

        let limits = Limits {
            min_individual: 1,
            min_individual_enabled: true,
            max_individual: i64::MAX,
            max_individual_enabled: true,
            ..Limits::default()
        };
        // the first chord spans more than i64::MAX, the second steps back down
        assert!(!within_limits(&[i64::MIN, i64::MAX], Some(&limits)));
        assert!(!within_limits(&[0, i64::MAX, i64::MIN], Some(&limits)));
        assert!(within_limits(&[-1, i64::MAX - 1], Some(&limits)));
    }
}
