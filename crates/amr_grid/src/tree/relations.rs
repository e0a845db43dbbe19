//! Tree relations - closed-form counting formulas and child geometry.
//!
//! Everything here is a pure function of the spatial dimension and the level.
//! Array pre-allocation downstream relies on these counts being exact.
//!
//! # Relative child positions
//!
//! ```text
//!              __________________________
//!            /|   pos: 6   |   pos: 7  /|
//!           / | (-1,+1,+1) | (+1,+1,+1) |
//!          /  |____________|____________|
//!         /   |   pos: 4   |   pos: 5   |
//!        /    | (-1,-1,+1) | (+1,-1,+1) |
//!       /     |____________|____________|
//!      /     /                   /     /
//!     /_____/___________________/     /
//!    |   pos: 2   |   pos: 3   |     /    y (1) ^
//!    | (-1,+1,-1) | (+1,+1,-1) |    /           |     ^ z (2)
//!    |____________|____________|   /            |    /
//!    |   pos: 0   |   pos: 1   |  /             |  /
//!    | (-1,-1,-1) | (+1,-1,-1) | /              |/
//!    |____________|____________|/               o-------> x (0)
//! ```
//!
//! The 1D and 2D tables are prefixes of the 3D one (first `2^D` rows, first
//! `D` columns), so a single table serves every dimension.

use glam::DVec3;

use crate::geometry::{BoundingLength, Centroid, NodeBox};
use crate::types::{ChildPos, Level, Offset};

/// Relative position (+1/-1 per axis) of each child w.r.t. its parent's
/// center. Row = child position, column = axis.
pub const RELATIVE_CHILD_POSITIONS: [[i8; 3]; 8] = [
  [-1, -1, -1],
  [1, -1, -1],
  [-1, 1, -1],
  [1, 1, -1],
  [-1, -1, 1],
  [1, -1, 1],
  [-1, 1, 1],
  [1, 1, 1],
];

/// Number of children of a node: `2^D`.
#[inline]
pub const fn children_count(dim: usize) -> u64 {
  1 << dim
}

/// Number of siblings of a node (nodes sharing its parent): `2^D`.
#[inline]
pub const fn siblings_count(dim: usize) -> u64 {
  children_count(dim)
}

/// Number of nodes sharing a single face of dimension `face_dim` within a
/// node: `2^face_dim` if `dim >= face_dim`, otherwise 0.
#[inline]
pub const fn nodes_sharing_face(dim: usize, face_dim: usize) -> u64 {
  if dim >= face_dim {
    1 << face_dim
  } else {
    0
  }
}

/// Number of nodes sharing a face of dimension `face_dim` at `level`:
/// `(2^face_dim)^level`.
///
/// A zero base at level 0 yields 0, not 1: no node shares a face that does
/// not exist.
#[inline]
pub fn nodes_sharing_face_at_level(dim: usize, face_dim: usize, level: Level) -> u64 {
  let base = nodes_sharing_face(dim, face_dim);
  if base == 0 && level == 0 {
    0
  } else {
    base.pow(level)
  }
}

/// Binomial coefficient `C(n, k)`.
pub const fn binomial_coefficient(n: usize, k: usize) -> u64 {
  if k > n {
    return 0;
  }
  let k = if k > n - k { n - k } else { k };
  let mut result: u64 = 1;
  let mut i = 0;
  while i < k {
    result = result * (n - i) as u64 / (i + 1) as u64;
    i += 1;
  }
  result
}

/// Number of faces of dimension `face_dim` of a node:
/// `2^(D - face_dim) * C(D, face_dim)` for `face_dim <= D`, otherwise 0.
///
/// In 3D: 6 faces (m = 2), 12 edges (m = 1), 8 corners (m = 0).
#[inline]
pub const fn faces_count(dim: usize, face_dim: usize) -> u64 {
  if face_dim <= dim {
    (1 << (dim - face_dim)) * binomial_coefficient(dim, face_dim)
  } else {
    0
  }
}

/// Number of nodes of a uniformly refined tree at `level`: `(2^D)^level`.
///
/// # Panics
/// On `u64` overflow in debug builds (beyond level 63 / D).
#[inline]
pub fn nodes_at_uniform_level(dim: usize, level: Level) -> u64 {
  children_count(dim).pow(level)
}

/// Number of nodes of a tree uniformly refined down to `level`:
/// `sum_{l=0}^{level} (2^D)^l`.
pub fn nodes_until_uniform_level(dim: usize, level: Level) -> u64 {
  (0..=level).map(|l| nodes_at_uniform_level(dim, l)).sum()
}

/// Normalized length of a node at `level` for a root of length 1.
#[inline]
pub fn node_length_at_level(level: Level) -> f64 {
  1.0 / (1u64 << level) as f64
}

/// Relative position of child `position` w.r.t. its parent's center.
///
/// Table lookup, not bit arithmetic: this sits in hot neighbor loops.
#[inline]
pub fn relative_child_position<const D: usize>(position: ChildPos) -> Offset<D> {
  const { assert!(D >= 1 && D <= 3, "dimension must be 1, 2 or 3") };
  let row = &RELATIVE_CHILD_POSITIONS[position.get() as usize];
  std::array::from_fn(|d| row[d])
}

/// Centroid of child `position` of a parent with `parent_centroid` and
/// `parent_length`: `parent_centroid + parent_length / 4 * rcp(position)`.
#[inline]
pub fn child_centroid<const D: usize>(
  position: ChildPos,
  parent_centroid: DVec3,
  parent_length: f64,
) -> DVec3 {
  let rcp = relative_child_position::<D>(position);
  let quarter = parent_length / 4.0;
  let mut centroid = parent_centroid;
  for d in 0..D {
    centroid[d] += quarter * rcp[d] as f64;
  }
  centroid
}

/// Box of child `position` of `parent`.
pub fn child_geometry<const D: usize, B>(position: ChildPos, parent: &B) -> NodeBox<D>
where
  B: Centroid + BoundingLength,
{
  let length = parent.bounding_length();
  NodeBox::new(
    child_centroid::<D>(position, parent.centroid(), length),
    length / 2.0,
  )
}

#[cfg(test)]
#[path = "relations_test.rs"]
mod relations_test;
