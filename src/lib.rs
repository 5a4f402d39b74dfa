//! Harmonic rationalization and chord-tree engine.
//!
//! This crate maps equal-tempered semitone intervals to exact just-intonation
//! ratios, finds the harmonic root of a chord under such a mapping, and grows
//! trees of trichords by repeatedly folding a symmetric seed chord.
//!
//! Every operation is a pure function over immutable values, so results can be
//! cached or recomputed freely by a presentation layer.

#![warn(missing_docs)]

pub mod config;
pub mod harmony;
pub mod tree;

pub use config::{Config, TreeSettings};
pub use harmony::{
    find_chord_root_offset, root_label, Rational, RationalError, Rationalizer, RationalizerError,
    RootError,
};
pub use tree::{
    generate_tree, infold_canonical, invert, outfold_down, outfold_up, position_to_path,
    position_to_pitches, within_limits, FoldOp, Limits, TreePosition, Trichord,
};
