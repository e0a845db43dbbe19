//! Structured tile indices - the cell grid every leaf node carries.
//!
//! A tile has `Nic` internal cells per axis surrounded by `Nhl` halo layers
//! on every side:
//!
//! ```text
//!   Nic = 4, Nhl = 1  (cells_per_length = 6)
//!
//!   5  h h h h h h
//!   4  h i i i i h        i = internal  (first_internal = 1,
//!   3  h i i i i h                       last_internal  = 4)
//!   2  h i i i i h        h = halo
//!   1  h i i i i h
//!   0  h h h h h h
//!      0 1 2 3 4 5
//! ```
//!
//! Coordinates are per-axis cell indices in `[0, cells_per_length)`. The
//! linear index runs axis 0 fastest. Arithmetic that leaves the tile is a
//! programming error and panics; [`TileLayout::try_at_offset`] is the
//! checked variant.

mod search;

pub use search::distance_squared;

use crate::tree::Manifold;

/// Per-axis cell index within a tile.
pub type CellCoord<const D: usize> = [usize; D];

/// Shape of a `D`-dimensional tile: internal cells and halo layers per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileLayout<const D: usize> {
  internal_cells: usize,
  halo_layers: usize,
}

impl<const D: usize> TileLayout<D> {
  /// Layout with `internal_cells` cells and `halo_layers` halo layers per
  /// axis.
  ///
  /// # Panics
  /// If either count is zero.
  pub fn new(internal_cells: usize, halo_layers: usize) -> Self {
    const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
    assert!(internal_cells > 0, "a tile needs at least one internal cell");
    assert!(halo_layers > 0, "a tile needs at least one halo layer");
    Self {
      internal_cells,
      halo_layers,
    }
  }

  #[inline]
  pub fn internal_cells(&self) -> usize {
    self.internal_cells
  }

  #[inline]
  pub fn halo_layers(&self) -> usize {
    self.halo_layers
  }

  /// Cells per axis, halos included: `Nic + 2 * Nhl`.
  #[inline]
  pub fn cells_per_length(&self) -> usize {
    self.internal_cells + 2 * self.halo_layers
  }

  /// Total number of cells.
  #[inline]
  pub fn size(&self) -> usize {
    self.cells_per_length().pow(D as u32)
  }

  /// Number of internal cells.
  #[inline]
  pub fn internal_size(&self) -> usize {
    self.internal_cells.pow(D as u32)
  }

  /// Number of halo cells.
  #[inline]
  pub fn halo_size(&self) -> usize {
    self.size() - self.internal_size()
  }

  /// First internal index along any axis.
  #[inline]
  pub fn first_internal(&self) -> usize {
    self.halo_layers
  }

  /// Last internal index along any axis.
  #[inline]
  pub fn last_internal(&self) -> usize {
    self.halo_layers + self.internal_cells - 1
  }

  // ===========================================================================
  // Index <-> coordinate
  // ===========================================================================

  /// Linear index of `coord` (axis 0 fastest).
  ///
  /// # Panics
  /// If `coord` is outside the tile.
  #[inline]
  pub fn index(&self, coord: CellCoord<D>) -> usize {
    self.assert_contains(coord);
    let n = self.cells_per_length();
    coord.iter().rev().fold(0, |acc, &c| acc * n + c)
  }

  /// Coordinate of linear index `index`.
  ///
  /// # Panics
  /// If `index >= size()`.
  #[inline]
  pub fn coordinate(&self, index: usize) -> CellCoord<D> {
    assert!(
      index < self.size(),
      "cell index {} out of range for a tile of {} cells",
      index,
      self.size()
    );
    let n = self.cells_per_length();
    let mut rest = index;
    std::array::from_fn(|_| {
      let c = rest % n;
      rest /= n;
      c
    })
  }

  /// Whether `coord` lies within the tile (halos included).
  #[inline]
  pub fn contains(&self, coord: CellCoord<D>) -> bool {
    let n = self.cells_per_length();
    coord.iter().all(|&c| c < n)
  }

  /// Whether `coord` is an internal cell.
  ///
  /// # Panics
  /// If `coord` is outside the tile.
  #[inline]
  pub fn is_internal(&self, coord: CellCoord<D>) -> bool {
    self.assert_contains(coord);
    let (first, last) = (self.first_internal(), self.last_internal());
    coord.iter().all(|&c| c >= first && c <= last)
  }

  /// Whether `coord` is a halo cell. Exactly one of `is_internal` and
  /// `is_halo` holds for every tile cell.
  ///
  /// # Panics
  /// If `coord` is outside the tile.
  #[inline]
  pub fn is_halo(&self, coord: CellCoord<D>) -> bool {
    !self.is_internal(coord)
  }

  // ===========================================================================
  // Coordinate arithmetic
  // ===========================================================================

  /// `coord` moved by `offset` cells along `axis`.
  ///
  /// # Panics
  /// If the result leaves the tile.
  pub fn at(&self, coord: CellCoord<D>, axis: usize, offset: isize) -> CellCoord<D> {
    assert!(axis < D, "axis {} out of range for dimension {}", axis, D);
    let mut offsets = [0isize; D];
    offsets[axis] = offset;
    self.at_offset(coord, offsets)
  }

  /// `coord` moved by `offset` cells.
  ///
  /// # Panics
  /// If the result leaves the tile.
  pub fn at_offset(&self, coord: CellCoord<D>, offset: [isize; D]) -> CellCoord<D> {
    match self.try_at_offset(coord, offset) {
      Some(moved) => moved,
      None => panic!(
        "cell {:?} moved by {:?} leaves the tile (cells per length {})",
        coord,
        offset,
        self.cells_per_length()
      ),
    }
  }

  /// `coord` moved by `offset` cells, or `None` if that leaves the tile.
  pub fn try_at_offset(&self, coord: CellCoord<D>, offset: [isize; D]) -> Option<CellCoord<D>> {
    let n = self.cells_per_length();
    let mut moved = coord;
    for d in 0..D {
      moved[d] = coord[d].checked_add_signed(offset[d]).filter(|&c| c < n)?;
    }
    Some(moved)
  }

  // ===========================================================================
  // Iteration
  // ===========================================================================

  /// Every cell, in linear index order.
  pub fn for_each<F: FnMut(CellCoord<D>)>(&self, f: F) {
    let last = self.cells_per_length() - 1;
    self.for_each_in([0; D], [last; D], f);
  }

  /// Every cell of the sub-tile `[from, to]` (inclusive), axis 0 fastest.
  ///
  /// # Panics
  /// If the bounds are outside the tile or `from > to` along any axis.
  pub fn for_each_in<F: FnMut(CellCoord<D>)>(&self, from: CellCoord<D>, to: CellCoord<D>, mut f: F) {
    self.assert_from_to(from, to);
    let mut coord = from;
    loop {
      f(coord);
      let mut d = 0;
      loop {
        if d == D {
          return;
        }
        if coord[d] < to[d] {
          coord[d] += 1;
          break;
        }
        coord[d] = from[d];
        d += 1;
      }
    }
  }

  /// Every internal cell.
  pub fn for_each_internal<F: FnMut(CellCoord<D>)>(&self, f: F) {
    self.for_each_in(
      [self.first_internal(); D],
      [self.last_internal(); D],
      f,
    );
  }

  /// Every halo cell.
  pub fn for_each_halo<F: FnMut(CellCoord<D>)>(&self, f: F) {
    let last = self.cells_per_length() - 1;
    self.for_each_ring([0; D], [last; D], self.halo_layers - 1, f);
  }

  /// Every cell of the box `[from, to]` within `width` steps of its
  /// boundary (width 0 = the boundary layer only). Each cell is visited
  /// once, in linear index order.
  ///
  /// # Panics
  /// If the two sides of the ring would overlap along any axis, i.e. unless
  /// `to - width > from + width`.
  pub fn for_each_ring<F: FnMut(CellCoord<D>)>(
    &self,
    from: CellCoord<D>,
    to: CellCoord<D>,
    width: usize,
    mut f: F,
  ) {
    for d in 0..D {
      assert!(
        to[d] as isize - width as isize > (from[d] + width) as isize,
        "ring cells overlap along axis {}: from {} to {} width {}",
        d,
        from[d],
        to[d],
        width
      );
    }
    self.assert_from_to(from, to);

    // Rows along axis 0. A row inside the band of a higher axis lies on the
    // ring in full, otherwise only its two ends do.
    let mut row = from;
    loop {
      let banded = (1..D).any(|d| row[d] <= from[d] + width || row[d] >= to[d] - width);
      if banded {
        for x in from[0]..=to[0] {
          row[0] = x;
          f(row);
        }
      } else {
        for x in (from[0]..=from[0] + width).chain(to[0] - width..=to[0]) {
          row[0] = x;
          f(row);
        }
      }

      let mut d = 1;
      loop {
        if d >= D {
          return;
        }
        if row[d] < to[d] {
          row[d] += 1;
          break;
        }
        row[d] = from[d];
        d += 1;
      }
    }
  }

  /// Cells `dist` steps from `coord` along every direction of `manifold`
  /// that stay within the tile.
  pub fn for_each_neighbor<F: FnMut(CellCoord<D>)>(
    &self,
    coord: CellCoord<D>,
    manifold: Manifold,
    dist: usize,
    mut f: F,
  ) {
    self.assert_contains(coord);
    for direction in manifold.directions::<D>() {
      let o = direction.offset();
      let offset = std::array::from_fn(|d| o[d] as isize * dist as isize);
      if let Some(neighbor) = self.try_at_offset(coord, offset) {
        f(neighbor);
      }
    }
  }

  #[inline]
  fn assert_contains(&self, coord: CellCoord<D>) {
    assert!(
      self.contains(coord),
      "cell {:?} outside the tile (cells per length {})",
      coord,
      self.cells_per_length()
    );
  }

  fn assert_from_to(&self, from: CellCoord<D>, to: CellCoord<D>) {
    self.assert_contains(from);
    self.assert_contains(to);
    for d in 0..D {
      assert!(
        from[d] <= to[d],
        "sub-tile bounds inverted along axis {}: {} > {}",
        d,
        from[d],
        to[d]
      );
    }
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
