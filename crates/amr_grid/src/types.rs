//! Index types shared by the tree, tile and halo modules.

use std::fmt;

/// Distance of a node from the root (root = level 0).
pub type Level = u32;

/// Per-axis offset with components in `{-1, 0, 1}`.
pub type Offset<const D: usize> = [i8; D];

/// Dense handle into a [`CompactTree`](crate::tree::CompactTree)'s node array.
///
/// Only valid while the tree it was obtained from is not mutated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIdx(pub usize);

impl NodeIdx {
  /// Position in the node array.
  #[inline]
  pub fn index(self) -> usize {
    self.0
  }
}

impl fmt::Display for NodeIdx {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Position of a child within its parent, in `[0, 2^D)`.
///
/// Bit `d` set means the child lies on the positive side of axis `d`:
///
/// ```text
///   2D:  ┌─────┬─────┐
///        │  2  │  3  │      y (1) ^
///        ├─────┼─────┤            │
///        │  0  │  1  │            o────> x (0)
///        └─────┴─────┘
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChildPos(u8);

impl ChildPos {
  /// Create a child position for a `D`-dimensional node.
  ///
  /// # Panics
  /// If `position >= 2^D`.
  #[inline]
  pub fn new<const D: usize>(position: u8) -> Self {
    assert!(
      (position as usize) < (1 << D),
      "child position {} out of range for dimension {}",
      position,
      D
    );
    Self(position)
  }

  /// All child positions of a `D`-dimensional node, in ascending order.
  pub fn all<const D: usize>() -> impl Iterator<Item = Self> {
    (0..(1u8 << D)).map(Self)
  }

  /// Raw position value.
  #[inline]
  pub fn get(self) -> u8 {
    self.0
  }

  /// Whether the child lies on the positive side of `axis`.
  #[inline]
  pub fn is_positive(self, axis: usize) -> bool {
    (self.0 >> axis) & 1 == 1
  }

  pub(crate) fn from_bits(bits: u8) -> Self {
    Self(bits)
  }
}

impl fmt::Display for ChildPos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
