//! Halo exchange between tiles of neighboring leaves.
//!
//! # Module Structure
//!
//! - [`mesh`]: `Mesh`, `Tile`, `StateBuffer` - per-leaf cell state
//! - [`exchange`]: the two-phase copy/restrict then project protocol
//! - [`limiter`]: slope limiters for projection
//! - [`stats`]: counts and timings of an exchange
//!
//! Halo cells across the domain boundary have no source and are left
//! untouched; filling them (boundary conditions) is the solver's job, see
//! [`Mesh::fill_halos`].

pub mod exchange;
pub mod limiter;
pub mod mesh;
pub mod stats;

// Re-exports
pub use exchange::{exchange_halos, phase_one, phase_two};
pub use limiter::Limiter;
pub use mesh::{Mesh, StateBuffer, Tile};
pub use stats::HaloExchangeStats;
