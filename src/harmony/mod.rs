//! Exact harmonic arithmetic: rationals, interval rationalization and chord
//! root finding.

pub mod rational;
pub mod rationalizer;
pub mod root;

pub use rational::{ParseRationalError, Rational, RationalError, RawRational};
pub use rationalizer::{Rationalizer, RationalizerError, BASE_RATIO_COUNT, DEFAULT_BASE_RATIOS, OCTAVE};
pub use root::{find_chord_root_offset, root_label, RootError, UNKNOWN_ROOT};
