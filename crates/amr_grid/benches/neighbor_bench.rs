//! Benchmarks for neighbor resolution on uniform and locally refined trees.

use amr_grid::tree::{all_leaf_neighbors, DeinterleavedLocation};
use amr_grid::{node_neighbor, CompactTree, Direction, InterleavedLocation, Location};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Same-level neighbors
// ============================================================================

fn bench_node_neighbor<const D: usize, L: Location<D>>(c: &mut Criterion, name: &str, level: u32) {
  let tree = CompactTree::<D, L>::uniform(level);
  let directions: Vec<Direction<D>> = Direction::all().collect();

  let mut group = c.benchmark_group("node_neighbor");
  group.throughput(Throughput::Elements((tree.len() * directions.len()) as u64));
  group.bench_function(BenchmarkId::new(name, level), |b| {
    b.iter(|| {
      let mut found = 0usize;
      for node in tree.nodes() {
        for &direction in &directions {
          if node_neighbor(&tree, node, direction).is_some() {
            found += 1;
          }
        }
      }
      black_box(found)
    })
  });
  group.finish();
}

fn bench_same_level(c: &mut Criterion) {
  bench_node_neighbor::<2, InterleavedLocation<2>>(c, "2d_interleaved", 6);
  bench_node_neighbor::<2, DeinterleavedLocation<2>>(c, "2d_deinterleaved", 6);
  bench_node_neighbor::<3, InterleavedLocation<3>>(c, "3d_interleaved", 4);
  bench_node_neighbor::<3, DeinterleavedLocation<3>>(c, "3d_deinterleaved", 4);
}

// ============================================================================
// Cross-level leaf neighbors
// ============================================================================

/// Uniform level-3 octree with every eighth leaf refined once more.
fn refined_octree() -> CompactTree<3> {
  let mut tree = CompactTree::<3>::uniform(3);
  let targets: Vec<InterleavedLocation<3>> = tree
    .leaves()
    .step_by(8)
    .map(|leaf| tree.location(leaf))
    .collect();
  for location in targets {
    if let Some(node) = tree.node_at(&location) {
      tree.refine(node);
    }
  }
  tree
}

fn bench_leaf_neighbors(c: &mut Criterion) {
  let tree = refined_octree();
  let leaves: Vec<_> = tree.leaves().collect();

  let mut group = c.benchmark_group("all_leaf_neighbors");
  group.throughput(Throughput::Elements(leaves.len() as u64));
  group.bench_function("3d_refined", |b| {
    b.iter(|| {
      let mut total = 0usize;
      for &leaf in &leaves {
        total += all_leaf_neighbors(&tree, leaf).len();
      }
      black_box(total)
    })
  });
  group.finish();
}

criterion_group!(benches, bench_same_level, bench_leaf_neighbors);
criterion_main!(benches);
