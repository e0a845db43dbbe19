//! Neighbor manifolds - the finite set of directions a node has neighbors in.
//!
//! A direction is a nonzero offset in `{-1, 0, 1}^D`. Its manifold is the
//! number of axes it moves along:
//!
//! ```text
//!   rank 1  Face     across a (D-1)-dimensional face     2D: 4   3D: 6
//!   rank 2  Edge     across a (D-2)-dimensional edge     2D: 4   3D: 12
//!   rank 3  Corner   across a corner                              3D: 8
//! ```
//!
//! In 2D the "edge" neighbors are the diagonal ones (they touch at a corner
//! point). The number of directions of rank `k` equals
//! [`faces_count(D, D - k)`](super::relations::faces_count).
//!
//! Directions of a manifold are enumerated with axis 0 varying fastest over
//! `-1, 0, +1`, skipping offsets of any other rank.

use crate::types::Offset;

/// Kind of neighbor relation, by number of participating axes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Manifold {
  /// Neighbors sharing a face (one axis).
  Face,
  /// Neighbors sharing an edge (two axes).
  Edge,
  /// Neighbors sharing a corner (three axes).
  Corner,
}

impl Manifold {
  /// Every manifold, lowest rank first.
  pub const ALL: [Manifold; 3] = [Manifold::Face, Manifold::Edge, Manifold::Corner];

  /// Number of axes a direction of this manifold moves along.
  #[inline]
  pub const fn rank(self) -> usize {
    match self {
      Manifold::Face => 1,
      Manifold::Edge => 2,
      Manifold::Corner => 3,
    }
  }

  /// Manifold of a given rank.
  pub const fn from_rank(rank: usize) -> Option<Self> {
    match rank {
      1 => Some(Manifold::Face),
      2 => Some(Manifold::Edge),
      3 => Some(Manifold::Corner),
      _ => None,
    }
  }

  /// Manifolds that exist in `D` dimensions.
  pub fn for_dimension<const D: usize>() -> impl Iterator<Item = Manifold> {
    Self::ALL.into_iter().filter(|m| m.rank() <= D)
  }

  /// Number of directions of this manifold in `D` dimensions.
  pub fn count<const D: usize>(self) -> usize {
    Self::directions::<D>(self).count()
  }

  /// Directions of this manifold in `D` dimensions, in enumeration order.
  pub fn directions<const D: usize>(self) -> impl Iterator<Item = Direction<D>> {
    all_offsets::<D>()
      .filter(move |offset| rank_of(offset) == self.rank())
      .map(|offset| Direction { offset })
  }
}

/// A neighbor direction: a nonzero offset with components in `{-1, 0, 1}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Direction<const D: usize> {
  offset: Offset<D>,
}

impl<const D: usize> Direction<D> {
  /// Direction with the given offset.
  ///
  /// # Panics
  /// If the offset is zero or any component is outside `{-1, 0, 1}`.
  pub fn new(offset: Offset<D>) -> Self {
    assert!(
      offset.iter().all(|o| (-1..=1).contains(o)),
      "direction components must be in {{-1, 0, 1}}, got {:?}",
      offset
    );
    assert!(rank_of(&offset) > 0, "direction offset must be nonzero");
    Self { offset }
  }

  /// Face direction along `axis` on the positive or negative side.
  pub fn face(axis: usize, positive: bool) -> Self {
    assert!(axis < D, "axis {} out of range for dimension {}", axis, D);
    let mut offset = [0; D];
    offset[axis] = if positive { 1 } else { -1 };
    Self { offset }
  }

  /// Every direction in `D` dimensions (`3^D - 1`), faces first.
  pub fn all() -> impl Iterator<Item = Self> {
    Manifold::for_dimension::<D>().flat_map(|m| m.directions::<D>())
  }

  /// Per-axis offset.
  #[inline]
  pub fn offset(&self) -> Offset<D> {
    self.offset
  }

  /// Manifold this direction belongs to.
  #[inline]
  pub fn manifold(&self) -> Manifold {
    match Manifold::from_rank(rank_of(&self.offset)) {
      Some(manifold) => manifold,
      None => unreachable!("direction rank is always in 1..=D"),
    }
  }

  /// Position of this direction within its manifold's enumeration.
  pub fn index(&self) -> usize {
    self
      .manifold()
      .directions::<D>()
      .position(|d| d == *self)
      .unwrap_or_else(|| unreachable!("every direction belongs to its manifold"))
  }

  /// The direction pointing the other way.
  #[inline]
  pub fn opposite(&self) -> Self {
    Self {
      offset: self.offset.map(|o| -o),
    }
  }
}

fn rank_of<const D: usize>(offset: &Offset<D>) -> usize {
  offset.iter().filter(|&&o| o != 0).count()
}

/// Every offset in `{-1, 0, 1}^D` (zero included), axis 0 fastest.
fn all_offsets<const D: usize>() -> impl Iterator<Item = Offset<D>> {
  const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
  let total = 3usize.pow(D as u32);
  (0..total).map(|mut i| {
    let mut offset = [0i8; D];
    for o in offset.iter_mut() {
      *o = (i % 3) as i8 - 1;
      i /= 3;
    }
    offset
  })
}

#[cfg(test)]
#[path = "manifold_test.rs"]
mod manifold_test;
