//! Geometry capability contracts and the square node box.
//!
//! Geometric primitives are not this crate's concern. The tree only needs to
//! ask a shape for its centroid, its bounding length and whether it contains
//! a point. Points are `glam::DVec3` for every dimension; axes at or beyond
//! `D` are ignored.

use glam::DVec3;

/// Shapes with a centroid.
pub trait Centroid {
  fn centroid(&self) -> DVec3;
}

/// Shapes with a bounding length (edge length of the bounding square/cube).
pub trait BoundingLength {
  fn bounding_length(&self) -> f64;
}

/// Shapes that can answer point containment.
pub trait ContainsPoint {
  fn contains_point(&self, point: DVec3) -> bool;
}

/// Axis-aligned square (1D: segment, 3D: cube) described by centroid and
/// edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox<const D: usize> {
  /// Center of the box.
  pub centroid: DVec3,
  /// Edge length along every axis.
  pub length: f64,
}

impl<const D: usize> NodeBox<D> {
  /// Create a box from centroid and edge length.
  ///
  /// # Panics
  /// Debug-asserts that the length is non-negative.
  pub fn new(centroid: DVec3, length: f64) -> Self {
    debug_assert!(length >= 0.0, "box length must be >= 0");
    Self { centroid, length }
  }

  /// Create a box from its minimum corner and edge length.
  pub fn from_min_length(min: DVec3, length: f64) -> Self {
    let mut centroid = min;
    for d in 0..D {
      centroid[d] += 0.5 * length;
    }
    Self::new(centroid, length)
  }

  /// Minimum corner (axes beyond `D` copy the centroid).
  #[inline]
  pub fn min(&self) -> DVec3 {
    let mut p = self.centroid;
    for d in 0..D {
      p[d] -= 0.5 * self.length;
    }
    p
  }

  /// Maximum corner (axes beyond `D` copy the centroid).
  #[inline]
  pub fn max(&self) -> DVec3 {
    let mut p = self.centroid;
    for d in 0..D {
      p[d] += 0.5 * self.length;
    }
    p
  }

  /// Check if this box overlaps another. Touching boxes overlap.
  #[inline]
  pub fn overlaps(&self, other: &Self) -> bool {
    let (a_min, a_max) = (self.min(), self.max());
    let (b_min, b_max) = (other.min(), other.max());
    (0..D).all(|d| a_min[d] <= b_max[d] && a_max[d] >= b_min[d])
  }
}

impl<const D: usize> Centroid for NodeBox<D> {
  #[inline]
  fn centroid(&self) -> DVec3 {
    self.centroid
  }
}

impl<const D: usize> BoundingLength for NodeBox<D> {
  #[inline]
  fn bounding_length(&self) -> f64 {
    self.length
  }
}

impl<const D: usize> ContainsPoint for NodeBox<D> {
  /// Inclusive on both faces.
  #[inline]
  fn contains_point(&self, point: DVec3) -> bool {
    let (min, max) = (self.min(), self.max());
    (0..D).all(|d| point[d] >= min[d] && point[d] <= max[d])
  }
}
