//! Toroidal B3/S23 engine internals and public API.

pub mod driver;
mod engine;
mod grid;
mod lcg;
mod rules;
pub mod schedule;
pub mod verify;

pub use engine::{ConfigError, DEFAULT_HEIGHT, DEFAULT_WIDTH, TorusLife, TorusLifeConfig};
pub use grid::{CellsView, Grid};
pub use lcg::Lcg;
pub use rules::next_liveness;
pub use verify::{Reference, ReferenceError};
