//! Octave extrapolation of the interval table.

use anyhow::Result;
use chordfold::harmony::{Rational, Rationalizer, RationalizerError, OCTAVE};

mod common;
use common::{ratio, twenty_fourths};

#[test]
fn test_twenty_fourths_scenario() -> Result<()> {
    let rz = twenty_fourths();

    assert_eq!(rz.eval(0)?, Rational::ONE);
    assert_eq!(rz.eval(12)?, ratio(1, 2));
    assert_eq!(rz.eval(-9)?, ratio(21, 12));

    Ok(())
}

#[test]
fn test_octave_law_for_any_table() -> Result<()> {
    for rz in [Rationalizer::default(), twenty_fourths()] {
        for n in -100..100 {
            assert_eq!(
                rz.eval(n + OCTAVE)?,
                rz.eval(n)?.multiply(&Rational::HALF)?,
                "octave law failed at {}",
                n
            );
        }
    }
    Ok(())
}

#[test]
fn test_residues_use_the_table() -> Result<()> {
    let rz = twenty_fourths();
    for (i, base) in rz.base_ratios().iter().enumerate() {
        let offset = i as i64 + 1;
        assert_eq!(rz.eval(offset)?, *base);
        assert_eq!(rz.eval(offset - OCTAVE)?, base.multiply(&ratio(2, 1))?);
    }
    Ok(())
}

#[test]
fn test_unison_for_every_octave() -> Result<()> {
    let rz = Rationalizer::default();
    for octaves in -5..=5 {
        assert_eq!(rz.eval(octaves * OCTAVE)?, Rational::HALF.pow(octaves)?);
    }
    Ok(())
}

#[test]
fn test_construction_failures() {
    assert!(matches!(
        Rationalizer::new(&[]),
        Err(RationalizerError::InvalidTableShape { got: 0, .. })
    ));

    let mut pairs = vec![(1, 2); 11];
    pairs[2] = (3, 0);
    assert!(matches!(
        Rationalizer::from_pairs(&pairs),
        Err(RationalizerError::InvalidTableElement { index: 2, .. })
    ));
}

#[test]
fn test_float_inputs() -> Result<()> {
    let rz = twenty_fourths();
    assert_eq!(rz.eval_f64(-9.0)?, ratio(7, 4));
    assert_eq!(rz.eval_f64(0.25), Err(RationalizerError::NonIntegerInput(0.25)));
    assert_eq!(
        rz.eval_f64(f64::INFINITY),
        Err(RationalizerError::NonFiniteInput(f64::INFINITY))
    );
    Ok(())
}
