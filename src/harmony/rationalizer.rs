//! Interval rationalization: semitone offsets to just-intonation ratios.
//!
//! A [`Rationalizer`] holds one ratio per pitch-class residue. Offset `0` is
//! always `1/1`; offsets `1..=11` come from the user's base table. Any other
//! offset is reduced to its residue and scaled by `1/2` for every octave
//! crossed, so ratios are "lower frequency over upper frequency" and lie in
//! `(0, 1]` for ascending intervals.

use thiserror::Error;

use super::rational::{Rational, RationalError};

/// Number of user-configurable base ratios (minor second through major seventh).
pub const BASE_RATIO_COUNT: usize = 11;

/// Semitones per octave
pub const OCTAVE: i64 = 12;

/// Default just-intonation table for offsets 1 through 11.
///
/// 16:15, 9:8, 6:5, 5:4, 4:3, 7:5, 3:2, 8:5, 5:3, 7:4, 15:8 written as
/// lower over upper frequency.
pub const DEFAULT_BASE_RATIOS: [Rational; BASE_RATIO_COUNT] = [
    Rational::new_unchecked(15, 16),
    Rational::new_unchecked(8, 9),
    Rational::new_unchecked(5, 6),
    Rational::new_unchecked(4, 5),
    Rational::new_unchecked(3, 4),
    Rational::new_unchecked(5, 7),
    Rational::new_unchecked(2, 3),
    Rational::new_unchecked(5, 8),
    Rational::new_unchecked(3, 5),
    Rational::new_unchecked(4, 7),
    Rational::new_unchecked(8, 15),
];

/// Errors from building or evaluating a [`Rationalizer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RationalizerError {
    /// The base table does not have exactly eleven entries.
    #[error("expected {expected} base ratios, got {got}")]
    InvalidTableShape {
        /// Required entry count
        expected: usize,
        /// Supplied entry count
        got: usize,
    },
    /// A raw `(a, b)` pair in the base table is not a valid rational.
    #[error("base ratio {index} ({a}:{b}) is invalid: {source}")]
    InvalidTableElement {
        /// Position in the base table (0 is the minor second)
        index: usize,
        /// Supplied numerator
        a: i64,
        /// Supplied denominator
        b: i64,
        /// Why construction failed
        source: RationalError,
    },
    /// A floating semitone offset had a fractional part.
    #[error("semitone offset {0} is not a whole number")]
    NonIntegerInput(f64),
    /// A floating semitone offset was NaN, infinite or outside the i64 range.
    #[error("semitone offset {0} is not finite")]
    NonFiniteInput(f64),
    /// The octave scaling for this offset does not fit the representation.
    #[error("ratio for semitone offset {offset} is not representable: {source}")]
    Ratio {
        /// The offset being evaluated
        offset: i64,
        /// Underlying arithmetic failure
        source: RationalError,
    },
}

/// Maps integer semitone offsets to exact frequency ratios.
///
/// Immutable once built; a configuration change builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rationalizer {
    table: [Rational; BASE_RATIO_COUNT + 1],
}

impl Default for Rationalizer {
    fn default() -> Self {
        Self::from_table(DEFAULT_BASE_RATIOS)
    }
}

impl Rationalizer {
    /// Builds a rationalizer from the eleven ratios for offsets 1 through 11.
    pub fn new(base_ratios: &[Rational]) -> Result<Self, RationalizerError> {
        let table = <[Rational; BASE_RATIO_COUNT]>::try_from(base_ratios).map_err(|_| {
            RationalizerError::InvalidTableShape {
                expected: BASE_RATIO_COUNT,
                got: base_ratios.len(),
            }
        })?;
        Ok(Self::from_table(table))
    }

    /// Builds a rationalizer from raw `(a, b)` integer pairs, as stored by a
    /// configuration layer.
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Result<Self, RationalizerError> {
        if pairs.len() != BASE_RATIO_COUNT {
            return Err(RationalizerError::InvalidTableShape {
                expected: BASE_RATIO_COUNT,
                got: pairs.len(),
            });
        }

        let ratios = pairs
            .iter()
            .enumerate()
            .map(|(index, &(a, b))| {
                Rational::new(a, b).map_err(|source| RationalizerError::InvalidTableElement {
                    index,
                    a,
                    b,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(&ratios)
    }

    fn from_table(base: [Rational; BASE_RATIO_COUNT]) -> Self {
        let mut table = [Rational::ONE; BASE_RATIO_COUNT + 1];
        table[1..].copy_from_slice(&base);
        Self { table }
    }

    /// The eleven user-supplied ratios, minor second first.
    pub fn base_ratios(&self) -> &[Rational] {
        &self.table[1..]
    }

    /// Ratio for an interval of `offset` semitones.
    ///
    /// `table[offset mod 12] * (1/2)^floor(offset / 12)`
    pub fn eval(&self, offset: i64) -> Result<Rational, RationalizerError> {
        let octaves = offset.div_euclid(OCTAVE);
        let residue = offset.rem_euclid(OCTAVE) as usize;

        let wrap = |source| RationalizerError::Ratio { offset, source };
        let scale = Rational::HALF.pow(octaves).map_err(wrap)?;
        self.table[residue].multiply(&scale).map_err(wrap)
    }

    /// Like [`Rationalizer::eval`] for offsets held as floating-point numbers.
    pub fn eval_f64(&self, offset: f64) -> Result<Rational, RationalizerError> {
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !offset.is_finite() || offset < i64::MIN as f64 || offset >= i64::MAX as f64 {
            return Err(RationalizerError::NonFiniteInput(offset));
        }
        if offset.fract() != 0.0 {
            return Err(RationalizerError::NonIntegerInput(offset));
        }
        self.eval(offset as i64)
    }

    /// True when the base ratios are strictly decreasing and all lie in
    /// `(1/2, 1)`.
    ///
    /// Tables failing this still evaluate; it only flags configurations where
    /// a wider interval is not a smaller ratio.
    pub fn is_well_formed(&self) -> bool {
        let base = self.base_ratios();
        let in_range = base.iter().all(|r| *r > Rational::HALF && *r < Rational::ONE);
        let decreasing = base.windows(2).all(|w| w[0] > w[1]);
        in_range && decreasing
    }
}
