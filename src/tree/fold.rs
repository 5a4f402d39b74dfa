//! Folding transformations on trichords.
//!
//! Outfolds grow the chord tree by reflecting the middle note across one of
//! the outer notes; infolding undoes whichever outfold produced a chord.

use serde::{Deserialize, Serialize};

/// Three pitches in semitones relative to middle C, read as `[low, mid, high]`.
///
/// The slots are positional. Nothing here requires them to be sorted.
pub type Trichord = [i64; 3];

/// Narrows a pitch computed in `i128` back to the chord's range.
fn pitch(value: i128) -> Option<i64> {
    i64::try_from(value).ok()
}

fn wide([low, mid, high]: Trichord) -> [i128; 3] {
    [i128::from(low), i128::from(mid), i128::from(high)]
}

/// `[low, mid, high] -> [low, high, high + (high - mid)]`
///
/// `None` when the new note falls outside the `i64` range.
pub fn outfold_up(chord: Trichord) -> Option<Trichord> {
    let [_, mid, high] = wide(chord);
    Some([chord[0], chord[2], pitch(2 * high - mid)?])
}

/// `[low, mid, high] -> [low - (mid - low), low, high]`
///
/// `None` when the new note falls outside the `i64` range.
pub fn outfold_down(chord: Trichord) -> Option<Trichord> {
    let [low, mid, _] = wide(chord);
    Some([pitch(2 * low - mid)?, chord[0], chord[2]])
}

/// Undoes the outfold that produced `chord`.
///
/// A narrower lower interval means the chord came from an upward fold, a
/// narrower upper interval from a downward one. Symmetric chords are tree
/// roots and are returned unchanged.
pub fn infold_canonical(chord: Trichord) -> Option<Trichord> {
    let [low, mid, high] = wide(chord);
    let delta_low = mid - low;
    let delta_high = high - mid;

    if delta_low < delta_high {
        Some([chord[1], pitch(mid + delta_low)?, chord[2]])
    } else if delta_high < delta_low {
        Some([chord[0], pitch(mid - delta_high)?, chord[1]])
    } else {
        Some(chord)
    }
}

/// Swaps the two interval sizes, keeping the outer notes.
pub fn invert(chord: Trichord) -> Option<Trichord> {
    let [low, mid, high] = wide(chord);
    Some([chord[0], pitch(low + (high - mid))?, chord[2]])
}

/// True when both intervals are equal, i.e. the chord is a tree root.
pub fn is_symmetric(chord: Trichord) -> bool {
    let [low, mid, high] = wide(chord);
    mid - low == high - mid
}

/// One branch of the chord tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldOp {
    /// Left branch, [`outfold_down`]
    Down,
    /// Right branch, [`outfold_up`]
    Up,
}

impl FoldOp {
    /// Applies this fold to a chord.
    pub fn apply(self, chord: Trichord) -> Option<Trichord> {
        match self {
            FoldOp::Down => outfold_down(chord),
            FoldOp::Up => outfold_up(chord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outfolds() {
        assert_eq!(outfold_up([0, 4, 7]), Some([0, 7, 10]));
        assert_eq!(outfold_down([0, 4, 7]), Some([-4, 0, 7]));
        assert_eq!(FoldOp::Up.apply([0, 4, 8]), Some([0, 8, 12]));
        assert_eq!(FoldOp::Down.apply([0, 4, 8]), Some([-4, 0, 8]));
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert([0, 4, 7]), Some([0, 3, 7]));
        assert_eq!(invert([0, 3, 7]), Some([0, 4, 7]));
        assert_eq!(invert([2, 6, 10]), Some([2, 6, 10]));
    }

    #[test]
    fn test_infold() {
        // upper interval narrower: fold down
        assert_eq!(infold_canonical([0, 4, 7]), Some([0, 1, 4]));
        // lower interval narrower: fold up
        assert_eq!(infold_canonical([0, 3, 7]), Some([3, 6, 7]));
        assert_eq!(infold_canonical([0, 4, 8]), Some([0, 4, 8]));
    }

    #[test]
    fn test_infold_undoes_outfold() {
        for root in [[0, 3, 6], [0, 4, 8], [-5, -1, 3], [1, 6, 11]] {
            let mut chord = root;
            for op in [FoldOp::Up, FoldOp::Down, FoldOp::Down, FoldOp::Up] {
                let child = op.apply(chord).unwrap();
                assert_eq!(infold_canonical(child), Some(chord), "{:?} then {:?}", chord, op);
                chord = child;
            }
        }
    }

    #[test]
    fn test_symmetry() {
        assert!(is_symmetric([0, 4, 8]));
        assert!(!is_symmetric([0, 4, 7]));
        assert!(!is_symmetric([i64::MIN, 0, i64::MAX]));
        assert!(is_symmetric([i64::MIN + 1, 0, i64::MAX]));
    }

    #[test]
    fn test_folds_at_the_edge_of_the_range() {
        assert_eq!(outfold_up([0, 0, i64::MAX]), None);
        assert_eq!(outfold_down([i64::MIN, 0, 1]), None);
        assert_eq!(invert([i64::MIN, i64::MAX, 0]), None);
        assert_eq!(infold_canonical([i64::MAX, i64::MIN, i64::MIN]), None);
        assert_eq!(FoldOp::Up.apply([0, 1, i64::MAX]), None);

        assert_eq!(
            outfold_up([0, i64::MAX - 2, i64::MAX - 1]),
            Some([0, i64::MAX - 1, i64::MAX])
        );
        // the intervals overflow i64 but the results fit
        assert_eq!(
            invert([i64::MIN, i64::MIN + 1, i64::MAX]),
            Some([i64::MIN, i64::MAX - 1, i64::MAX])
        );
        assert_eq!(
            infold_canonical([i64::MIN, i64::MAX - 1, i64::MAX]),
            Some([i64::MIN, i64::MAX - 2, i64::MAX - 1])
        );
    }
}
