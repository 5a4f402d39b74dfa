//! Binary tree coordinates.
//!
//! Row 0 holds the symmetric root chord and row `r` has `2^r` columns. A
//! column's bits, most significant first, spell the branches taken from the
//! root: 0 is left ([`FoldOp::Down`]), 1 is right ([`FoldOp::Up`]).

use serde::{Deserialize, Serialize};

use super::fold::{FoldOp, Trichord};

/// Deepest addressable row. Paths are materialized one fold per row, so this
/// bounds their length.
pub const MAX_ROW: u32 = 1 << 16;

/// True when `(row, col)` addresses a node: `row <= MAX_ROW` and
/// `0 <= col < 2^row`.
pub fn column_in_range(row: u32, col: i64) -> bool {
    // every non-negative i64 is below 2^63
    row <= MAX_ROW && col >= 0 && (row >= 63 || col < (1_i64 << row))
}

/// Branches from the root to `(row, col)`, first branch first.
///
/// Returns `None` for a column outside `[0, 2^row)` or a row past [`MAX_ROW`].
pub fn position_to_path<T: Clone>(row: u32, col: i64, left: T, right: T) -> Option<Vec<T>> {
    if !column_in_range(row, col) {
        return None;
    }

    let mut bits = col as u64;
    let mut path = Vec::with_capacity(row as usize);
    for _ in 0..row {
        path.push(if bits % 2 == 0 { left.clone() } else { right.clone() });
        bits /= 2;
    }
    path.reverse();

    Some(path)
}

/// Column reached by following `path` from the root, reading `right` as a 1
/// bit and anything else as 0. `None` if the column overflows an `i64`.
pub fn path_to_column<T: PartialEq>(path: &[T], right: &T) -> Option<i64> {
    path.iter().try_fold(0_i64, |col, step| {
        col.checked_mul(2)?.checked_add(i64::from(step == right))
    })
}

/// The symmetric chord at the root of a tree: `[bass, bass + degree, bass + 2 * degree]`.
///
/// `None` when the top note does not fit in an `i64`.
pub fn bass_chord(root_degree: i64, bass_pitch: i64) -> Option<Trichord> {
    let mid = bass_pitch.checked_add(root_degree)?;
    Some([bass_pitch, mid, mid.checked_add(root_degree)?])
}

/// The chord at `(row, col)` in the tree grown from [`bass_chord`].
///
/// Returns `None` for an out-of-range position, or when a chord on the way
/// leaves the `i64` pitch range.
pub fn position_to_pitches(
    root_degree: i64,
    row: u32,
    col: i64,
    bass_pitch: i64,
) -> Option<Trichord> {
    let path = position_to_path(row, col, FoldOp::Down, FoldOp::Up)?;
    path.into_iter()
        .try_fold(bass_chord(root_degree, bass_pitch)?, |chord, op| op.apply(chord))
}

/// A validated `(row, column)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreePosition {
    /// Depth below the root
    pub row: u32,
    /// Index within the row, `0 <= col < 2^row`
    pub col: i64,
}

impl TreePosition {
    /// The root node.
    pub const ROOT: TreePosition = TreePosition { row: 0, col: 0 };

    /// Returns `None` when `col` is outside the row.
    pub fn new(row: u32, col: i64) -> Option<Self> {
        column_in_range(row, col).then_some(Self { row, col })
    }

    /// The node this one was outfolded from. `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let row = self.row.checked_sub(1)?;
        Some(Self { row, col: self.col / 2 })
    }

    /// Child reached through `op`.
    pub fn child(&self, op: FoldOp) -> Option<Self> {
        let col = self.col.checked_mul(2)?.checked_add(match op {
            FoldOp::Down => 0,
            FoldOp::Up => 1,
        })?;
        Self::new(self.row.checked_add(1)?, col)
    }

    /// Left child, grown with [`FoldOp::Down`].
    pub fn left(&self) -> Option<Self> {
        self.child(FoldOp::Down)
    }

    /// Right child, grown with [`FoldOp::Up`].
    pub fn right(&self) -> Option<Self> {
        self.child(FoldOp::Up)
    }

    /// Folds from the root to this node.
    pub fn path(&self) -> Vec<FoldOp> {
        position_to_path(self.row, self.col, FoldOp::Down, FoldOp::Up).unwrap_or_default()
    }

    /// Chord at this node for the given root chord, if it stays within the
    /// `i64` pitch range.
    pub fn chord(&self, root_degree: i64, bass_pitch: i64) -> Option<Trichord> {
        position_to_pitches(root_degree, self.row, self.col, bass_pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_examples() {
        assert_eq!(position_to_path(3, 2, "L", "R"), Some(vec!["L", "R", "L"]));
        assert_eq!(position_to_path(3, 1, "L", "R"), Some(vec!["L", "L", "R"]));
        assert_eq!(position_to_path(3, 6, 'L', 'R'), Some(vec!['R', 'R', 'L']));
        assert_eq!(position_to_path(0, 0, 0, 1), Some(vec![]));
    }

    #[test]
    fn test_path_bounds() {
        assert_eq!(position_to_path(3, -1, "L", "R"), None);
        assert_eq!(position_to_path(3, 8, "L", "R"), None);
        assert_eq!(position_to_path(0, 1, 0, 1), None);
        assert!(column_in_range(70, i64::MAX));
        assert!(!column_in_range(62, 1 << 62));
    }

    #[test]
    fn test_row_bound() {
        assert_eq!(position_to_path(u32::MAX, 0, 0, 1), None);
        assert_eq!(position_to_path(MAX_ROW + 1, 0, 0, 1), None);
        assert_eq!(position_to_path(MAX_ROW, 0, 0, 1).map(|p| p.len()), Some(MAX_ROW as usize));
        assert_eq!(TreePosition::new(MAX_ROW, 0).and_then(|pos| pos.left()), None);
    }

    #[test]
    fn test_pitches_out_of_range() {
        assert_eq!(bass_chord(i64::MAX / 2, 0), Some([0, i64::MAX / 2, i64::MAX - 1]));
        assert_eq!(bass_chord(i64::MAX / 2 + 1, 0), None);
        assert_eq!(position_to_pitches(i64::MAX / 2, 1, 1, 0), None);
        assert_eq!(
            position_to_pitches(i64::MAX / 2, 1, 0, 0),
            Some([-(i64::MAX / 2), 0, i64::MAX - 1])
        );
        assert_eq!(TreePosition::new(1, 1).and_then(|pos| pos.chord(i64::MAX / 2, 0)), None);
    }

    #[test]
    fn test_path_round_trip() {
        for row in 0..8 {
            for col in 0..(1_i64 << row) {
                let path = position_to_path(row, col, 0, 1).unwrap();
                assert_eq!(path.len(), row as usize);
                assert_eq!(path_to_column(&path, &1), Some(col));
            }
        }
    }

    #[test]
    fn test_pitches() {
        assert_eq!(position_to_pitches(4, 0, 0, 0), Some([0, 4, 8]));
        assert_eq!(position_to_pitches(4, 1, 0, 0), Some([-4, 0, 8]));
        assert_eq!(position_to_pitches(4, 1, 1, 0), Some([0, 8, 12]));
        assert_eq!(position_to_pitches(3, 2, 2, 0), Some([-6, 0, 9]));
        assert_eq!(position_to_pitches(3, 0, 0, 5), Some([5, 8, 11]));
        assert_eq!(position_to_pitches(3, 2, 4, 0), None);
    }

    #[test]
    fn test_navigation() {
        let pos = TreePosition::new(3, 5).unwrap();
        assert_eq!(pos.parent(), TreePosition::new(2, 2));
        assert_eq!(pos.left(), TreePosition::new(4, 10));
        assert_eq!(pos.right(), TreePosition::new(4, 11));
        assert_eq!(pos.path(), vec![FoldOp::Up, FoldOp::Down, FoldOp::Up]);
        assert_eq!(TreePosition::ROOT.parent(), None);
        assert_eq!(TreePosition::new(2, 4), None);
        assert_eq!(pos.chord(4, 0), position_to_pitches(4, 3, 5, 0));
        assert_eq!(pos.chord(4, 0), Some([-8, 12, 24]));
    }
}
