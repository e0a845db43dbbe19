//! Shared test fixtures.

use glam::DVec3;

use crate::config::GridConfig;
use crate::halo::Mesh;
use crate::tree::{CompactTree, InterleavedLocation, Location};
use crate::types::ChildPos;

/// Small deterministic generator for randomized tests (64-bit LCG, Knuth's
/// MMIX constants).
pub struct Lcg(u64);

impl Lcg {
  pub fn new(seed: u64) -> Self {
    Self(seed)
  }

  pub fn next_u64(&mut self) -> u64 {
    self.0 = self
      .0
      .wrapping_mul(6364136223846793005)
      .wrapping_add(1442695040888963407);
    self.0 >> 11
  }
}

/// Interleaved 2D location from a child position path.
pub fn loc2(path: &[u8]) -> InterleavedLocation<2> {
  InterleavedLocation::from_path(path.iter().map(|&p| ChildPos::new::<2>(p)))
}

/// Level-1 quadtree with leaf `[1]` refined to level 2 (default config:
/// unit domain, Nic = 4, Nhl = 1, one variable).
///
/// ```text
///   ┌───────┬───────┐
///   │  [2]  │  [3]  │
///   ├───────┼───┬───┤
///   │       │1,2│1,3│
///   │  [0]  ├───┼───┤
///   │       │1,0│1,1│
///   └───────┴───┴───┘
/// ```
pub fn two_level_mesh() -> Mesh<2> {
  let mut tree = CompactTree::<2>::uniform(1);
  let node = tree.node_at(&loc2(&[1])).unwrap();
  assert!(tree.refine(node));
  Mesh::new(tree, GridConfig::default()).unwrap()
}

/// Linear field used to check that the exchange is exact for linear data.
pub fn linear_field(x: DVec3) -> f64 {
  1.0 + 2.0 * x.x - 3.0 * x.y + 0.5 * x.z
}

/// Whether `x` lies outside the root domain along one of the first `D` axes.
pub fn outside_domain<const D: usize>(config: &GridConfig, x: DVec3) -> bool {
  (0..D).any(|d| x[d] < config.origin[d] || x[d] > config.origin[d] + config.root_length)
}

/// Fill internal cells with `f` and set halos across the domain boundary
/// to `f` as a boundary condition.
pub fn fill_with_boundary<const D: usize, L: Location<D>>(mesh: &mut Mesh<D, L>, f: fn(DVec3) -> f64) {
  mesh.fill_internal(|x, state| state[0] = f(x));
  let config = mesh.config().clone();
  mesh.fill_halos(|x, state| {
    if outside_domain::<D>(&config, x) {
      state[0] = f(x);
    }
  });
}
