//! # Canonicalization Module
//!
//! Symmetry canonicalization for grid positions using the D4 dihedral group.
//! A rectangular window has 8 symmetries: 4 rotations (0°, 90°, 180°, 270°)
//! and their 4 horizontal reflections.
//!
//! The canonical key is the lexicographically minimal serialization of the
//! window over all 8 orientations. Two positions that are rotations or
//! reflections of each other therefore produce the identical key, which is
//! what lets the engine suppress duplicate subtrees.
//!
//! Brute-force enumeration of the 8 transforms is deliberate: for a window
//! bounded by 9x9 it is both the simplest and a perfectly fast strategy, and
//! correctness of the deduplication key is what matters.

use ndarray::{Array2, ArrayView2};
use smallvec::SmallVec;

use crate::games::Cell;

/// Render the window as a character grid (`.` empty, `O`/`X` marks).
fn to_char_grid(window: &ArrayView2<Cell>) -> Array2<char> {
    Array2::from_shape_fn(window.dim(), |(row, col)| window[[row, col]].to_char())
}

/// Rotate a character grid 90° clockwise: `(r, c) -> (c, h - 1 - r)`.
pub(crate) fn rotate_90_clockwise(grid: &Array2<char>) -> Array2<char> {
    let (height, width) = grid.dim();
    Array2::from_shape_fn((width, height), |(row, col)| grid[[height - 1 - col, row]])
}

/// Reflect a character grid left-to-right: `(r, c) -> (r, w - 1 - c)`.
pub(crate) fn reflect_horizontal(grid: &Array2<char>) -> Array2<char> {
    let (height, width) = grid.dim();
    Array2::from_shape_fn((height, width), |(row, col)| grid[[row, width - 1 - col]])
}

/// Serialize a character grid, one row at a time, `|` after each row.
///
/// The row terminator keeps serializations of different window shapes
/// distinct (a 3x6 window never collides with a 6x3 one).
pub(crate) fn serialize(grid: &Array2<char>) -> String {
    let (height, width) = grid.dim();
    let mut out = String::with_capacity(height * (width + 1));
    for row in grid.rows() {
        for &ch in row.iter() {
            out.push(ch);
        }
        out.push('|');
    }
    out
}

/// Compute the canonical key for a window of cells.
///
/// Generates all 8 orientations (4 rotations, each with its horizontal
/// reflection) and returns the lexicographically smallest serialization.
pub fn canonical_key(window: &ArrayView2<Cell>) -> String {
    let mut grid = to_char_grid(window);
    let mut keys: SmallVec<[String; 8]> = SmallVec::new();

    for _ in 0..4 {
        keys.push(serialize(&grid));
        keys.push(serialize(&reflect_horizontal(&grid)));
        grid = rotate_90_clockwise(&grid);
    }

    keys.into_iter().min().unwrap_or_default()
}
