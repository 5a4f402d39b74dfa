#![allow(dead_code)]

use chordfold::harmony::{Rational, Rationalizer};

/// Shorthand for a rational that is known to be valid.
pub fn ratio(a: i64, b: i64) -> Rational {
    Rational::new(a, b).expect("test ratio must be valid")
}

/// Base table 23/24, 22/24, ... 13/24 for offsets 1 through 11.
pub fn twenty_fourths() -> Rationalizer {
    let pairs: Vec<(i64, i64)> = (1..=11).map(|k| (24 - k, 24)).collect();
    Rationalizer::from_pairs(&pairs).expect("24ths table is valid")
}

/// Default table with one offset's ratio replaced.
pub fn default_with(offset: usize, replacement: Rational) -> Rationalizer {
    let mut ratios = Rationalizer::default().base_ratios().to_vec();
    ratios[offset - 1] = replacement;
    Rationalizer::new(&ratios).expect("table keeps eleven entries")
}

/// A spread of awkward integers for property checks.
pub fn sample_integers() -> Vec<i64> {
    vec![
        -1_000_000_007,
        -720,
        -49,
        -12,
        -7,
        -1,
        1,
        2,
        3,
        9,
        16,
        45,
        360,
        1024,
        999_983,
        i64::MAX / 3,
    ]
}
