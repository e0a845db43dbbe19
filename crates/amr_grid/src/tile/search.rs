//! Closest-cell search by outward rings.
//!
//! ```text
//!   ring 2   2 2 2 2 2
//!   ring 1   2 1 1 1 2
//!            2 1 x 1 2      x = start
//!            2 1 1 1 2
//!            2 2 2 2 2
//! ```
//!
//! Rings are Chebyshev shells clipped to the tile, walked with
//! [`TileLayout::for_each_ring`]. The first ring holding a match decides;
//! within it the match closest to the start (Euclidean) wins.

use super::{CellCoord, TileLayout};

/// Squared Euclidean distance between two cell coordinates.
#[inline]
pub fn distance_squared<const D: usize>(a: CellCoord<D>, b: CellCoord<D>) -> usize {
  (0..D).map(|d| a[d].abs_diff(b[d]).pow(2)).sum()
}

impl<const D: usize> TileLayout<D> {
  /// Closest cell to `start` satisfying `predicate`, searching rings of
  /// radius `1..=max_ring`. The start cell itself is never considered.
  ///
  /// Returns `None` when no ring up to `max_ring` holds a match.
  ///
  /// # Panics
  /// If `start` is outside the tile, or if two matches in the first
  /// matching ring are equally close to `start`. Which of them is "closest"
  /// is then undefined and silently picking one would hide a modelling bug.
  pub fn closest_cell<P>(&self, start: CellCoord<D>, mut predicate: P, max_ring: usize) -> Option<CellCoord<D>>
  where
    P: FnMut(CellCoord<D>) -> bool,
  {
    assert!(
      self.contains(start),
      "search start {:?} outside the tile",
      start
    );
    let last = self.cells_per_length() - 1;

    // No cell lies further than `last` rings away.
    for ring in 1..=max_ring.min(last) {
      let from: CellCoord<D> = std::array::from_fn(|d| start[d].saturating_sub(ring));
      let to: CellCoord<D> = std::array::from_fn(|d| (start[d] + ring).min(last));

      // The shell lies on the boundary of the clipped box; clipped sides
      // are nearer than `ring` and get filtered out.
      let mut closest: Option<(CellCoord<D>, usize)> = None;
      let mut tied = false;
      self.for_each_ring(from, to, 0, |cell| {
        let chebyshev = (0..D).map(|d| cell[d].abs_diff(start[d])).max().unwrap_or(0);
        if chebyshev != ring || !predicate(cell) {
          return;
        }
        let distance = distance_squared(start, cell);
        match closest {
          Some((_, best)) if distance == best => tied = true,
          Some((_, best)) if distance > best => {}
          _ => {
            closest = Some((cell, distance));
            tied = false;
          }
        }
      });

      if let Some((cell, _)) = closest {
        assert!(
          !tied,
          "multiple cells equally close to {:?} satisfy the predicate (one of them is {:?})",
          start,
          cell
        );
        return Some(cell);
      }
    }
    None
  }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
