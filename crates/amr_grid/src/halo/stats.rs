//! Statistics from a halo exchange.

/// Counts and timings of one exchange (or one phase of it).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HaloExchangeStats {
  /// Halo cells copied from a same-level neighbor.
  pub copied_cells: usize,
  /// Halo cells restricted from a finer neighbor.
  pub restricted_cells: usize,
  /// Halo cells projected from a coarser neighbor.
  pub projected_cells: usize,
  /// (leaf, direction) pairs with no neighboring leaf, e.g. the domain
  /// boundary. Counted once per exchange, in phase one.
  pub absent_directions: usize,
  /// Wall time of phase one (copy + restrict) in microseconds.
  pub phase_one_us: u64,
  /// Wall time of phase two (project) in microseconds.
  pub phase_two_us: u64,
}

impl HaloExchangeStats {
  /// Total halo cells written.
  #[inline]
  pub fn total_cells(&self) -> usize {
    self.copied_cells + self.restricted_cells + self.projected_cells
  }

  /// Total wall time in microseconds.
  #[inline]
  pub fn total_us(&self) -> u64 {
    self.phase_one_us + self.phase_two_us
  }

  /// Sum of two partial statistics.
  pub fn merge(self, other: Self) -> Self {
    Self {
      copied_cells: self.copied_cells + other.copied_cells,
      restricted_cells: self.restricted_cells + other.restricted_cells,
      projected_cells: self.projected_cells + other.projected_cells,
      absent_directions: self.absent_directions + other.absent_directions,
      phase_one_us: self.phase_one_us + other.phase_one_us,
      phase_two_us: self.phase_two_us + other.phase_two_us,
    }
  }
}
