//! Slope limiters for the coarse-to-fine projection.

use serde::{Deserialize, Serialize};

/// Slope reconstruction from the one-sided differences around a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limiter {
  /// Central difference `(left + right) / 2`. Exact for linear data,
  /// oscillates at discontinuities.
  Unlimited,
  /// Smaller one-sided difference if both agree in sign, else zero.
  #[default]
  Minmod,
}

impl Limiter {
  /// Slope per cell from `left = u[i] - u[i-1]` and `right = u[i+1] - u[i]`.
  #[inline]
  pub fn slope(self, left: f64, right: f64) -> f64 {
    match self {
      Limiter::Unlimited => 0.5 * (left + right),
      Limiter::Minmod => {
        if left * right > 0.0 {
          left.signum() * left.abs().min(right.abs())
        } else {
          0.0
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_is_minmod() {
    assert_eq!(Limiter::default(), Limiter::Minmod);
  }

  #[test]
  fn test_unlimited_is_central_difference() {
    assert_eq!(Limiter::Unlimited.slope(1.0, 3.0), 2.0);
    assert_eq!(Limiter::Unlimited.slope(-1.0, 1.0), 0.0);
  }

  #[test]
  fn test_minmod() {
    assert_eq!(Limiter::Minmod.slope(1.0, 3.0), 1.0);
    assert_eq!(Limiter::Minmod.slope(-4.0, -2.0), -2.0);
    // Extremum: differences disagree in sign
    assert_eq!(Limiter::Minmod.slope(1.0, -1.0), 0.0);
    assert_eq!(Limiter::Minmod.slope(0.0, 5.0), 0.0);
  }

  /// Both limiters reproduce the slope of linear data.
  #[test]
  fn test_linear_data_is_preserved() {
    for limiter in [Limiter::Unlimited, Limiter::Minmod] {
      assert_eq!(limiter.slope(0.5, 0.5), 0.5);
    }
  }
}
