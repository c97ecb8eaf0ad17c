//! Conway's Game of Life (B3/S23) on a fixed-size torus, advanced with a
//! column-sliced parallel update and checked against run-length fingerprints.

pub mod snapshot;
pub mod torus;
pub use torus::{Reference, TorusLife, TorusLifeConfig};
