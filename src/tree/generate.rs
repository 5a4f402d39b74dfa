//! Bounded, row-by-row generation of the chord tree.
//!
//! Each row is built from the previous one, so deep trees cost memory for one
//! row at a time and no recursion.

use log::{debug, warn};

use super::fold::{FoldOp, Trichord};
use super::limits::{within_limits, Limits};
use super::position::{bass_chord, TreePosition};

/// Deepest tree [`generate_tree`] builds. Row `r` holds `2^r` nodes, so every
/// row past this one costs more than all earlier rows together.
pub const MAX_TREE_DEPTH: u32 = 20;

/// A chord placed in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    /// Where the chord sits
    pub position: TreePosition,
    /// The chord itself
    pub chord: Trichord,
    /// Whether the chord passes the active limits
    pub visible: bool,
}

/// Lazily yields the rows of a chord tree, root row first.
///
/// The tree is unbounded; callers bound it with `take`. A node whose chord
/// would leave the `i64` pitch range is left out together with its subtree,
/// and iteration stops once a row comes out empty.
#[derive(Debug, Clone)]
pub struct TreeRows {
    root: Option<Trichord>,
    previous: Option<Vec<(TreePosition, Trichord)>>,
}

impl TreeRows {
    /// Rows of the tree grown from `[bass, bass + degree, bass + 2 * degree]`.
    pub fn new(root_degree: i64, bass_pitch: i64) -> Self {
        Self {
            root: bass_chord(root_degree, bass_pitch),
            previous: None,
        }
    }
}

impl Iterator for TreeRows {
    type Item = Vec<(TreePosition, Trichord)>;

    fn next(&mut self) -> Option<Self::Item> {
        let row: Vec<_> = match &self.previous {
            None => self.root.map(|chord| (TreePosition::ROOT, chord)).into_iter().collect(),
            Some(previous) => previous
                .iter()
                .flat_map(|&(pos, chord)| {
                    [FoldOp::Down, FoldOp::Up]
                        .into_iter()
                        .filter_map(move |op| Some((pos.child(op)?, op.apply(chord)?)))
                })
                .collect(),
        };

        if row.is_empty() {
            return None;
        }

        self.previous = Some(row.clone());
        Some(row)
    }
}

/// Rows `0..=depth` of the tree, each node flagged with [`within_limits`].
///
/// Hidden nodes keep their children, so a chord outside the limits can have
/// visible descendants. `depth` is clamped to [`MAX_TREE_DEPTH`].
pub fn generate_tree(
    root_degree: i64,
    bass_pitch: i64,
    depth: u32,
    limits: Option<&Limits>,
) -> Vec<Vec<TreeNode>> {
    let depth = if depth > MAX_TREE_DEPTH {
        warn!("tree depth {} clamped to {}", depth, MAX_TREE_DEPTH);
        MAX_TREE_DEPTH
    } else {
        depth
    };

    let rows: Vec<Vec<TreeNode>> = TreeRows::new(root_degree, bass_pitch)
        .take(depth as usize + 1)
        .map(|row| {
            row.into_iter()
                .map(|(position, chord)| TreeNode {
                    position,
                    chord,
                    visible: within_limits(&chord, limits),
                })
                .collect()
        })
        .collect();

    debug!(
        "generated {} rows from root degree {} on {}: {} nodes, {} visible",
        rows.len(),
        root_degree,
        bass_pitch,
        rows.iter().map(Vec::len).sum::<usize>(),
        rows.iter().flatten().filter(|node| node.visible).count()
    );

    rows
}
