//! Chord root finding.
//!
//! Every note of a chord is tuned against its lower neighbour with the
//! rationalizer, which fixes the exact frequency of each note relative to the
//! lowest one. The root is the highest pitch at or below the lowest note whose
//! harmonic series contains every note of the chord: each note's frequency
//! divided by the root's must be a whole number.

use log::{debug, trace, warn};
use thiserror::Error;

use super::rational::{Rational, RationalError};
use super::rationalizer::{Rationalizer, RationalizerError};

/// Label shown in place of a root that cannot be determined.
pub const UNKNOWN_ROOT: &str = "?";

/// Failure modes of [`find_chord_root_offset`].
///
/// `NonFiniteResult` and `ZeroRatio` are expected outcomes of user data; see
/// [`RootError::is_recoverable`]. Everything else is a defect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    /// The chord needs harmonic numbers too large for the finite i64 representation.
    #[error("chord root is not finite in the i64 representation")]
    NonFiniteResult,
    /// A configured ratio involved in the search is exactly zero.
    #[error("chord root search hit a zero_ratio interval")]
    ZeroRatio,
    /// Called with no notes.
    #[error("cannot find the root of an empty chord")]
    EmptyChord,
    /// Unexpected arithmetic failure.
    #[error("arithmetic failure while finding chord root: {0}")]
    Arithmetic(#[source] RationalError),
    /// Unexpected rationalizer failure.
    #[error("rationalizer failure while finding chord root: {0}")]
    Rationalizer(#[source] RationalizerError),
}

impl RootError {
    /// True for the routine failures a display layer degrades to
    /// [`UNKNOWN_ROOT`]; false for defects that must be surfaced.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RootError::NonFiniteResult | RootError::ZeroRatio)
    }
}

impl From<RationalError> for RootError {
    fn from(e: RationalError) -> Self {
        match e {
            RationalError::NonFiniteValue => RootError::NonFiniteResult,
            other => RootError::Arithmetic(other),
        }
    }
}

impl From<RationalizerError> for RootError {
    fn from(e: RationalizerError) -> Self {
        match e {
            RationalizerError::Ratio {
                source: RationalError::NonFiniteValue,
                ..
            } => RootError::NonFiniteResult,
            other => RootError::Rationalizer(other),
        }
    }
}

/// Finds the root pitch of an ascending chord.
///
/// Returns the root in semitones relative to middle C. The root may lie far
/// below the chord. A single note is its own root.
///
/// The downward search always terminates: once the candidate is 63 octaves
/// below the lowest note its ratio no longer fits in an `i64`, which ends the
/// search with [`RootError::NonFiniteResult`].
pub fn find_chord_root_offset(rationalizer: &Rationalizer, chord: &[i64]) -> Result<i64, RootError> {
    let (&lowest, rest) = chord.split_first().ok_or(RootError::EmptyChord)?;
    if rest.is_empty() {
        return Ok(lowest);
    }

    let freqs = relative_frequencies(rationalizer, chord)?;

    let mut drop: i64 = 0;
    loop {
        // frequency of the candidate root over the lowest note
        let ratio = rationalizer.eval(drop)?;
        if ratio.is_zero() {
            warn!("zero ratio for {} semitones while finding root of {:?}", drop, chord);
            return Err(RootError::ZeroRatio);
        }

        let lowest_harmonic = ratio.recip()?;
        if is_harmonic_series(&freqs, &lowest_harmonic)? {
            let root = lowest.checked_sub(drop).ok_or(RootError::NonFiniteResult)?;
            debug!(
                "root of {:?} is {} ({} semitones below, lowest note is harmonic {})",
                chord, root, drop, lowest_harmonic
            );
            return Ok(root);
        }

        trace!("no root {} semitones below {:?}", drop, chord);
        drop += 1;
    }
}

/// Maps a root-finding result to display text: the root offset, or
/// [`UNKNOWN_ROOT`] for recoverable failures. Defects are returned as errors.
pub fn root_label(rationalizer: &Rationalizer, chord: &[i64]) -> Result<String, RootError> {
    match find_chord_root_offset(rationalizer, chord) {
        Ok(root) => Ok(root.to_string()),
        Err(e) if e.is_recoverable() => {
            debug!("root of {:?} unavailable: {}", chord, e);
            Ok(UNKNOWN_ROOT.to_string())
        }
        Err(e) => Err(e),
    }
}

/// Exact frequency of each note divided by the frequency of the first note,
/// composed from the ratios of consecutive intervals.
fn relative_frequencies(rationalizer: &Rationalizer, chord: &[i64]) -> Result<Vec<Rational>, RootError> {
    let mut current = Rational::ONE;
    let mut freqs = Vec::with_capacity(chord.len());
    freqs.push(current);

    for pair in chord.windows(2) {
        let delta = pair[1].checked_sub(pair[0]).ok_or(RootError::NonFiniteResult)?;
        let step = rationalizer.eval(delta)?;
        if step.is_zero() {
            warn!("zero ratio for {} semitones in chord {:?}", delta, chord);
            return Err(RootError::ZeroRatio);
        }

        // step is lower over upper frequency
        current = current.multiply(&step.recip()?)?;
        trace!("{} -> {}: step {}, relative frequency {}", pair[0], pair[1], step, current);
        freqs.push(current);
    }

    Ok(freqs)
}

fn is_harmonic_series(freqs: &[Rational], lowest_harmonic: &Rational) -> Result<bool, RootError> {
    for f in freqs {
        let harmonic = f.multiply(lowest_harmonic)?;
        if !harmonic.is_integer() || harmonic.numer() <= 0 {
            return Ok(false);
        }
    }
    Ok(true)
}
