//! Pattern simulation module
//!
//! Everything that decides where a marker is lives here. This module must stay pure:
//! - Randomness only through an injected `Rng`
//! - Stable iteration order (arcs in creation order)
//! - No rendering or platform dependencies

pub mod arc;
pub mod color;
pub mod state;
pub mod tick;

pub use arc::{RadialArc, orbit_offsets};
pub use color::Hsl;
pub use state::{PatternConfig, PatternState, UniformRange};
pub use tick::tick;
