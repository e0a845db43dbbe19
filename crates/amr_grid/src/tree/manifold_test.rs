use super::*;
use crate::tree::relations::faces_count;

#[test]
fn test_direction_counts() {
  assert_eq!(Direction::<1>::all().count(), 2);
  assert_eq!(Direction::<2>::all().count(), 8);
  assert_eq!(Direction::<3>::all().count(), 26);
}

/// Directions of rank k are exactly the (D - k)-dimensional faces of a node.
#[test]
fn test_manifold_counts_match_faces() {
  fn check<const D: usize>() {
    for m in Manifold::for_dimension::<D>() {
      assert_eq!(
        m.count::<D>() as u64,
        faces_count(D, D - m.rank()),
        "D={} manifold={:?}",
        D,
        m
      );
    }
  }
  check::<1>();
  check::<2>();
  check::<3>();
}

#[test]
fn test_manifolds_per_dimension() {
  assert_eq!(Manifold::for_dimension::<1>().count(), 1);
  assert_eq!(Manifold::for_dimension::<2>().count(), 2);
  assert_eq!(Manifold::for_dimension::<3>().count(), 3);
}

#[test]
fn test_face_enumeration_order_2d() {
  let faces: Vec<_> = Manifold::Face
    .directions::<2>()
    .map(|d| d.offset())
    .collect();
  assert_eq!(faces, vec![[0, -1], [-1, 0], [1, 0], [0, 1]]);
}

#[test]
fn test_opposite_is_involution() {
  for d in Direction::<3>::all() {
    let o = d.opposite();
    assert_ne!(d, o);
    assert_eq!(o.opposite(), d);
    assert_eq!(o.manifold(), d.manifold());
  }
}

#[test]
fn test_index_is_enumeration_position() {
  for m in Manifold::for_dimension::<3>() {
    for (i, d) in m.directions::<3>().enumerate() {
      assert_eq!(d.index(), i);
      assert_eq!(d.manifold(), m);
    }
  }
}

#[test]
fn test_face_constructor() {
  let d = Direction::<3>::face(1, false);
  assert_eq!(d.offset(), [0, -1, 0]);
  assert_eq!(d.manifold(), Manifold::Face);
  assert_eq!(Direction::<3>::new([0, -1, 0]), d);
}

#[test]
#[should_panic(expected = "nonzero")]
fn test_zero_direction_panics() {
  let _ = Direction::<2>::new([0, 0]);
}

#[test]
#[should_panic(expected = "components")]
fn test_non_unit_direction_panics() {
  let _ = Direction::<2>::new([2, 0]);
}
