use super::*;

fn layout2() -> TileLayout<2> {
  TileLayout::new(4, 1)
}

// =========================================================================
// Shape
// =========================================================================

#[test]
fn test_sizes() {
  let l1 = TileLayout::<1>::new(4, 2);
  assert_eq!(l1.cells_per_length(), 8);
  assert_eq!(l1.size(), 8);
  assert_eq!(l1.internal_size(), 4);
  assert_eq!(l1.halo_size(), 4);

  let l2 = layout2();
  assert_eq!(l2.size(), 36);
  assert_eq!(l2.internal_size(), 16);
  assert_eq!(l2.halo_size(), 20);
  assert_eq!(l2.first_internal(), 1);
  assert_eq!(l2.last_internal(), 4);

  let l3 = TileLayout::<3>::new(2, 1);
  assert_eq!(l3.size(), 64);
  assert_eq!(l3.internal_size(), 8);
}

#[test]
#[should_panic(expected = "halo layer")]
fn test_zero_halo_layers_panics() {
  let _ = TileLayout::<2>::new(4, 0);
}

// =========================================================================
// Index <-> coordinate
// =========================================================================

#[test]
fn test_index_axis_zero_fastest() {
  let l = layout2();
  assert_eq!(l.index([0, 0]), 0);
  assert_eq!(l.index([1, 0]), 1);
  assert_eq!(l.index([0, 1]), 6);
  assert_eq!(l.index([5, 5]), 35);

  let l3 = TileLayout::<3>::new(2, 1);
  assert_eq!(l3.index([1, 2, 3]), 1 + 2 * 4 + 3 * 16);
}

#[test]
fn test_index_coordinate_roundtrip() {
  let l = TileLayout::<3>::new(4, 2);
  for i in 0..l.size() {
    assert_eq!(l.index(l.coordinate(i)), i);
  }
}

#[test]
#[should_panic(expected = "outside the tile")]
fn test_index_out_of_tile_panics() {
  let _ = layout2().index([6, 0]);
}

// =========================================================================
// Classification
// =========================================================================

/// Internal and halo partition the tile.
#[test]
fn test_internal_halo_partition() {
  let l = TileLayout::<3>::new(4, 2);
  let mut internal = 0;
  let mut halo = 0;
  l.for_each(|c| {
    assert_ne!(l.is_internal(c), l.is_halo(c));
    if l.is_internal(c) {
      internal += 1;
    } else {
      halo += 1;
    }
  });
  assert_eq!(internal, l.internal_size());
  assert_eq!(halo, l.halo_size());
}

#[test]
fn test_classification_examples() {
  let l = layout2();
  assert!(l.is_internal([1, 1]));
  assert!(l.is_internal([4, 4]));
  assert!(l.is_halo([0, 3]));
  assert!(l.is_halo([5, 5]));
  assert!(l.contains([5, 0]));
  assert!(!l.contains([6, 0]));
}

// =========================================================================
// Arithmetic
// =========================================================================

#[test]
fn test_at_moves_along_axis() {
  let l = layout2();
  assert_eq!(l.at([2, 2], 0, 1), [3, 2]);
  assert_eq!(l.at([2, 2], 1, -2), [2, 0]);
  assert_eq!(l.at_offset([2, 2], [-1, 3]), [1, 5]);
}

#[test]
fn test_try_at_offset_bounds() {
  let l = layout2();
  assert_eq!(l.try_at_offset([0, 0], [-1, 0]), None);
  assert_eq!(l.try_at_offset([5, 5], [0, 1]), None);
  assert_eq!(l.try_at_offset([0, 5], [5, -5]), Some([5, 0]));
}

#[test]
#[should_panic(expected = "leaves the tile")]
fn test_at_out_of_bounds_panics() {
  let _ = layout2().at([0, 3], 0, -1);
}

// =========================================================================
// Iteration
// =========================================================================

#[test]
fn test_for_each_visits_in_index_order() {
  let l = TileLayout::<2>::new(2, 1);
  let mut seen = Vec::new();
  l.for_each(|c| seen.push(l.index(c)));
  assert_eq!(seen, (0..l.size()).collect::<Vec<_>>());
}

#[test]
fn test_for_each_in_sub_tile() {
  let l = layout2();
  let mut seen = Vec::new();
  l.for_each_in([1, 2], [2, 3], |c| seen.push(c));
  assert_eq!(seen, vec![[1, 2], [2, 2], [1, 3], [2, 3]]);
}

#[test]
fn test_for_each_internal_and_halo_counts() {
  let l = TileLayout::<2>::new(4, 2);
  let mut internal = 0;
  l.for_each_internal(|c| {
    assert!(l.is_internal(c));
    internal += 1;
  });
  let mut halo = Vec::new();
  l.for_each_halo(|c| {
    assert!(l.is_halo(c));
    halo.push(c);
  });
  assert_eq!(internal, 16);
  assert_eq!(halo.len(), l.halo_size());
  halo.dedup();
  assert_eq!(halo.len(), l.halo_size());
}

#[test]
fn test_for_each_ring_width_zero() {
  let l = layout2();
  let mut ring = Vec::new();
  l.for_each_ring([1, 1], [4, 4], 0, |c| ring.push(c));
  // Boundary of a 4x4 box.
  assert_eq!(ring.len(), 12);
  assert!(ring.iter().all(|c| l.is_internal(*c)));
  assert!(!ring.contains(&[2, 2]));
}

/// Only band cells are visited, once each, in linear index order.
#[test]
fn test_for_each_ring_matches_filtered_box() {
  let l = TileLayout::<3>::new(6, 2);
  let (from, to, width) = ([1, 2, 0], [8, 7, 6], 1);

  let mut ring = Vec::new();
  l.for_each_ring(from, to, width, |c| ring.push(c));

  let mut expected = Vec::new();
  l.for_each_in(from, to, |c| {
    if (0..3).any(|d| c[d] <= from[d] + width || c[d] >= to[d] - width) {
      expected.push(c);
    }
  });
  assert_eq!(ring, expected);
  assert!(ring.windows(2).all(|w| l.index(w[0]) < l.index(w[1])));
}

#[test]
fn test_for_each_ring_1d() {
  let l = TileLayout::<1>::new(4, 1);
  let mut ring = Vec::new();
  l.for_each_ring([0], [5], 1, |c| ring.push(c));
  assert_eq!(ring, vec![[0], [1], [4], [5]]);
}

#[test]
#[should_panic(expected = "overlap")]
fn test_for_each_ring_overlap_panics() {
  // Width 2 on a 4-wide box reaches from both sides past the middle.
  layout2().for_each_ring([1, 1], [4, 4], 2, |_| {});
}

#[test]
fn test_for_each_neighbor_by_manifold() {
  let l = layout2();
  let mut faces = Vec::new();
  l.for_each_neighbor([2, 2], Manifold::Face, 1, |c| faces.push(c));
  assert_eq!(faces, vec![[2, 1], [1, 2], [3, 2], [2, 3]]);

  let mut corners = Vec::new();
  l.for_each_neighbor([0, 0], Manifold::Edge, 2, |c| corners.push(c));
  // Only the (+, +) diagonal stays in the tile.
  assert_eq!(corners, vec![[2, 2]]);
}
