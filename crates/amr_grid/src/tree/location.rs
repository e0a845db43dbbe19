//! Location codes - a node's position and level packed into a value type.
//!
//! A location is the path of child positions from the root to a node. Both
//! representations in this module family answer the same queries and order
//! the same way; only their storage differs:
//!
//! - [`InterleavedLocation`](super::InterleavedLocation): path bits packed
//!   into one word behind a sentinel bit (Morton order).
//! - [`DeinterleavedLocation`](super::DeinterleavedLocation): one integer
//!   coordinate per axis plus the level.
//!
//! # Ordering
//!
//! `Ord` is depth-first order: an ancestor sorts before its descendants,
//! siblings sort by child position. A depth-first traversal of the tree
//! visits nodes in ascending location order, which is what lets the compact
//! tree binary search its location array.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::types::{ChildPos, Level, Offset};

/// Unsigned storage word of an interleaved location.
pub trait Word: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
  /// Number of bits in the word.
  const BITS: u32;

  fn to_u64(self) -> u64;

  /// Truncating conversion; callers guarantee the value fits.
  fn from_u64(value: u64) -> Self;
}

impl Word for u32 {
  const BITS: u32 = u32::BITS;

  #[inline]
  fn to_u64(self) -> u64 {
    self as u64
  }

  #[inline]
  fn from_u64(value: u64) -> Self {
    value as u32
  }
}

impl Word for u64 {
  const BITS: u32 = u64::BITS;

  #[inline]
  fn to_u64(self) -> u64 {
    self
  }

  #[inline]
  fn from_u64(value: u64) -> Self {
    value
  }
}

/// Position and level of a node in a `D`-dimensional tree.
///
/// Implementations must order depth-first (see module docs).
pub trait Location<const D: usize>: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync {
  /// Deepest level the representation can encode.
  const MAX_LEVEL: Level;

  /// The root node (level 0, empty path).
  fn root() -> Self;

  /// Distance from the root.
  fn level(&self) -> Level;

  /// Child position taken when descending to `level` (`1..=self.level()`).
  fn child_position(&self, level: Level) -> ChildPos;

  /// Descend one level to child `position`.
  ///
  /// # Panics
  /// At [`Self::MAX_LEVEL`].
  fn push(&mut self, position: ChildPos);

  /// Ascend one level, returning the child position that was dropped.
  ///
  /// # Panics
  /// At the root.
  fn pop(&mut self) -> ChildPos;

  /// Integer position along each axis, in cells of this node's own level
  /// (each component is in `[0, 2^level)`).
  fn coordinates(&self) -> [u64; D];

  /// Location at `level` whose integer position is `coordinates`.
  ///
  /// # Panics
  /// If `level > MAX_LEVEL` or a coordinate is `>= 2^level`.
  fn from_coordinates(coordinates: [u64; D], level: Level) -> Self;

  /// Whether the stored bits describe a location this type can produce.
  fn is_valid(&self) -> bool;

  // ===========================================================================
  // Provided
  // ===========================================================================

  #[inline]
  fn is_root(&self) -> bool {
    self.level() == 0
  }

  /// Child at `position`, or `None` at [`Self::MAX_LEVEL`].
  fn child(&self, position: ChildPos) -> Option<Self> {
    if self.level() >= Self::MAX_LEVEL {
      return None;
    }
    let mut child = *self;
    child.push(position);
    Some(child)
  }

  /// Parent, or `None` at the root.
  fn parent(&self) -> Option<Self> {
    if self.is_root() {
      return None;
    }
    let mut parent = *self;
    parent.pop();
    Some(parent)
  }

  /// Ancestor at `level` (the node itself when `level == self.level()`).
  ///
  /// # Panics
  /// If `level > self.level()`.
  fn ancestor(&self, level: Level) -> Self {
    assert!(
      level <= self.level(),
      "ancestor level {} is below node level {}",
      level,
      self.level()
    );
    let mut ancestor = *self;
    while ancestor.level() > level {
      ancestor.pop();
    }
    ancestor
  }

  /// Whether `self` is a strict ancestor of `other`.
  fn is_ancestor_of(&self, other: &Self) -> bool {
    self.level() < other.level() && other.ancestor(self.level()) == *self
  }

  /// Location reached by following `path` from the root.
  fn from_path<I: IntoIterator<Item = ChildPos>>(path: I) -> Self {
    let mut location = Self::root();
    for position in path {
      location.push(position);
    }
    location
  }

  /// Child positions from the root down to this node.
  fn path(&self) -> SmallVec<[ChildPos; 32]> {
    (1..=self.level()).map(|l| self.child_position(l)).collect()
  }

  /// Node one step away along `offset` at the same level.
  ///
  /// Returns `None` when the shifted node lies outside the root domain.
  ///
  /// # Panics
  /// If any offset component has magnitude other than 0 or 1. Shifting is a
  /// neighbor query, not an arbitrary translation.
  fn shift(&self, offset: Offset<D>) -> Option<Self> {
    for (d, o) in offset.iter().enumerate() {
      assert!(
        (-1..=1).contains(o),
        "shift offset must be unit per axis, got {} along axis {}",
        o,
        d
      );
    }
    let extent = 1u64 << self.level();
    let mut coordinates = self.coordinates();
    for d in 0..D {
      let shifted = coordinates[d].checked_add_signed(offset[d] as i64)?;
      if shifted >= extent {
        return None;
      }
      coordinates[d] = shifted;
    }
    Some(Self::from_coordinates(coordinates, self.level()))
  }

  /// Same node in another location representation.
  ///
  /// # Panics
  /// If this node is deeper than `M::MAX_LEVEL`.
  fn convert<M: Location<D>>(&self) -> M {
    M::from_coordinates(self.coordinates(), self.level())
  }
}

/// Depth-first comparison through the public [`Location`] queries.
///
/// Compares the paths position by position over their common prefix; if one
/// path is a prefix of the other, the shorter (the ancestor) sorts first.
pub fn depth_first_cmp<const D: usize, L: Location<D>>(a: &L, b: &L) -> Ordering {
  let common = a.level().min(b.level());
  for level in 1..=common {
    match a.child_position(level).cmp(&b.child_position(level)) {
      Ordering::Equal => continue,
      unequal => return unequal,
    }
  }
  a.level().cmp(&b.level())
}

/// Child position at bit `shift` of each coordinate.
#[inline]
pub(crate) fn position_from_coordinates<const D: usize>(coordinates: &[u64; D], shift: u32) -> ChildPos {
  let mut bits = 0u8;
  for (d, c) in coordinates.iter().enumerate() {
    bits |= (((c >> shift) & 1) as u8) << d;
  }
  ChildPos::from_bits(bits)
}

/// Asserts every coordinate fits the grid of `level`.
#[inline]
pub(crate) fn assert_coordinates_in_level<const D: usize>(coordinates: &[u64; D], level: Level) {
  for (d, c) in coordinates.iter().enumerate() {
    assert!(
      level >= 64 || *c < (1u64 << level),
      "coordinate {} along axis {} out of range for level {}",
      c,
      d,
      level
    );
  }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;
