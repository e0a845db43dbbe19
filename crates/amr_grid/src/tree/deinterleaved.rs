//! Deinterleaved location code - one integer coordinate per axis.
//!
//! Stores the node's integer position at its own level and the level itself.
//! Child/parent derivation is the coordinate math of an implicit octree:
//! `child = parent * 2 + bit`, `parent = child / 2`.

use std::cmp::Ordering;
use std::fmt;

use super::location::{assert_coordinates_in_level, depth_first_cmp, Location};
use crate::types::{ChildPos, Level};

/// Location code with per-axis coordinates and a separate level.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeinterleavedLocation<const D: usize> {
  /// Position along each axis at this node's level.
  coordinates: [u32; D],
  /// Distance from the root.
  level: u8,
}

impl<const D: usize> Location<D> for DeinterleavedLocation<D> {
  const MAX_LEVEL: Level = u32::BITS;

  #[inline]
  fn root() -> Self {
    const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
    Self {
      coordinates: [0; D],
      level: 0,
    }
  }

  #[inline]
  fn level(&self) -> Level {
    self.level as Level
  }

  #[inline]
  fn child_position(&self, level: Level) -> ChildPos {
    let own = self.level();
    assert!(
      level >= 1 && level <= own,
      "level {} outside path 1..={}",
      level,
      own
    );
    let shift = own - level;
    let mut bits = 0u8;
    for (d, c) in self.coordinates.iter().enumerate() {
      bits |= (((c >> shift) & 1) as u8) << d;
    }
    ChildPos::from_bits(bits)
  }

  #[inline]
  fn push(&mut self, position: ChildPos) {
    assert!(
      self.level() < Self::MAX_LEVEL,
      "cannot descend below max level {}",
      Self::MAX_LEVEL
    );
    for (d, c) in self.coordinates.iter_mut().enumerate() {
      *c = (*c << 1) | position.is_positive(d) as u32;
    }
    self.level += 1;
  }

  #[inline]
  fn pop(&mut self) -> ChildPos {
    assert!(!self.is_root(), "the root has no parent");
    let mut bits = 0u8;
    for (d, c) in self.coordinates.iter_mut().enumerate() {
      bits |= ((*c & 1) as u8) << d;
      *c >>= 1;
    }
    self.level -= 1;
    ChildPos::from_bits(bits)
  }

  #[inline]
  fn coordinates(&self) -> [u64; D] {
    std::array::from_fn(|d| self.coordinates[d] as u64)
  }

  fn from_coordinates(coordinates: [u64; D], level: Level) -> Self {
    const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
    assert!(
      level <= Self::MAX_LEVEL,
      "level {} exceeds max level {}",
      level,
      Self::MAX_LEVEL
    );
    assert_coordinates_in_level(&coordinates, level);
    Self {
      coordinates: std::array::from_fn(|d| coordinates[d] as u32),
      level: level as u8,
    }
  }

  fn is_valid(&self) -> bool {
    self.level() <= Self::MAX_LEVEL
      && self
        .coordinates
        .iter()
        .all(|&c| self.level() >= 32 || (c as u64) < (1u64 << self.level()))
  }
}

impl<const D: usize> Ord for DeinterleavedLocation<D> {
  fn cmp(&self, other: &Self) -> Ordering {
    depth_first_cmp::<D, _>(self, other)
  }
}

impl<const D: usize> PartialOrd for DeinterleavedLocation<D> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<const D: usize> fmt::Debug for DeinterleavedLocation<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DeinterleavedLocation")
      .field("level", &self.level)
      .field("coordinates", &self.coordinates)
      .finish()
  }
}
