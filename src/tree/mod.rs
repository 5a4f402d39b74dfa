//! The chord tree: folding operations, coordinates, display limits and
//! generation.

pub mod fold;
pub mod generate;
pub mod limits;
pub mod position;

pub use fold::{infold_canonical, invert, is_symmetric, outfold_down, outfold_up, FoldOp, Trichord};
pub use generate::{generate_tree, TreeNode, TreeRows, MAX_TREE_DEPTH};
pub use limits::{within_limits, Limits};
pub use position::{
    bass_chord, column_in_range, path_to_column, position_to_path, position_to_pitches,
    TreePosition, MAX_ROW,
};
