//! Interleaved location code - the path packed into a single word.
//!
//! ```text
//!   code = 1 | p1 | p2 | ... | pL        (each p is D bits, p1 = root's child)
//!          ^
//!          sentinel bit (marks the level)
//!
//!   2D, path [3, 0, 1]:   1 11 00 01  = 0b1110001
//! ```
//!
//! The sentinel makes every code unique across levels. The level is recovered
//! from the position of the highest set bit, so no separate field is needed.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use super::location::{assert_coordinates_in_level, position_from_coordinates, Location, Word};
use crate::types::{ChildPos, Level};

/// Location code with the level interleaved into the bit pattern.
///
/// `W` is the storage word (`u32` or `u64`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterleavedLocation<const D: usize, W: Word = u64> {
  code: W,
  _dim: PhantomData<[(); D]>,
}

impl<const D: usize, W: Word> InterleavedLocation<D, W> {
  const POSITION_MASK: u64 = (1 << D) - 1;

  #[inline]
  fn from_code(code: u64) -> Self {
    Self {
      code: W::from_u64(code),
      _dim: PhantomData,
    }
  }

  /// Raw code word (sentinel bit included).
  #[inline]
  pub fn raw(&self) -> W {
    self.code
  }

  /// Rebuild a location from its raw code, if well formed.
  pub fn from_raw(code: W) -> Option<Self> {
    let location = Self::from_code(code.to_u64());
    location.is_valid().then_some(location)
  }

  #[inline]
  fn significant_bits(&self) -> u32 {
    u64::BITS - self.code.to_u64().leading_zeros()
  }
}

impl<const D: usize, W: Word> Location<D> for InterleavedLocation<D, W> {
  const MAX_LEVEL: Level = (W::BITS - 1) / D as u32;

  #[inline]
  fn root() -> Self {
    const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
    Self::from_code(1)
  }

  #[inline]
  fn level(&self) -> Level {
    (self.significant_bits() - 1) / D as u32
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
    let shift = (own - level) * D as u32;
    ChildPos::from_bits(((self.code.to_u64() >> shift) & Self::POSITION_MASK) as u8)
  }

  #[inline]
  fn push(&mut self, position: ChildPos) {
    assert!(
      self.level() < Self::MAX_LEVEL,
      "cannot descend below max level {}",
      Self::MAX_LEVEL
    );
    let code = (self.code.to_u64() << D) | position.get() as u64;
    self.code = W::from_u64(code);
  }

  #[inline]
  fn pop(&mut self) -> ChildPos {
    assert!(!self.is_root(), "the root has no parent");
    let code = self.code.to_u64();
    let position = ChildPos::from_bits((code & Self::POSITION_MASK) as u8);
    self.code = W::from_u64(code >> D);
    position
  }

  fn coordinates(&self) -> [u64; D] {
    let mut coordinates = [0u64; D];
    for level in 1..=self.level() {
      let position = self.child_position(level);
      for (d, c) in coordinates.iter_mut().enumerate() {
        *c = (*c << 1) | position.is_positive(d) as u64;
      }
    }
    coordinates
  }

  fn from_coordinates(coordinates: [u64; D], level: Level) -> Self {
    assert!(
      level <= Self::MAX_LEVEL,
      "level {} exceeds max level {}",
      level,
      Self::MAX_LEVEL
    );
    assert_coordinates_in_level(&coordinates, level);
    let mut location = Self::root();
    for l in 1..=level {
      location.push(position_from_coordinates(&coordinates, level - l));
    }
    location
  }

  fn is_valid(&self) -> bool {
    let bits = self.significant_bits();
    bits > 0 && (bits - 1) % D as u32 == 0 && (bits - 1) / D as u32 <= Self::MAX_LEVEL
  }
}

impl<const D: usize, W: Word> Ord for InterleavedLocation<D, W> {
  /// Depth-first order by aligning the shorter code to the longer one.
  fn cmp(&self, other: &Self) -> Ordering {
    let (a, b) = (self.code.to_u64(), other.code.to_u64());
    let (la, lb) = (self.level(), other.level());
    match la.cmp(&lb) {
      Ordering::Equal => a.cmp(&b),
      Ordering::Less => {
        let b_aligned = b >> ((lb - la) * D as u32);
        a.cmp(&b_aligned).then(Ordering::Less)
      }
      Ordering::Greater => {
        let a_aligned = a >> ((la - lb) * D as u32);
        a_aligned.cmp(&b).then(Ordering::Greater)
      }
    }
  }
}

impl<const D: usize, W: Word> PartialOrd for InterleavedLocation<D, W> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<const D: usize, W: Word> fmt::Debug for InterleavedLocation<D, W> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InterleavedLocation")
      .field("level", &self.level())
      .field("coordinates", &self.coordinates())
      .finish()
  }
}
