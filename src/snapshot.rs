//! Headless frame export.
//!
//! Writes a generation as a binary PBM (P4) image at one pixel per cell: live
//! cells white, dead cells black. In PBM a set bit is black, so live cells are
//! written as 0.

use std::io::{self, Write};

use crate::torus::Grid;

pub fn write_pbm<W: Write>(grid: &Grid, mut out: W) -> io::Result<()> {
    write!(out, "P4\n{} {}\n", grid.width(), grid.height())?;
    let mut packed = vec![0u8; grid.width().div_ceil(8)];
    for y in 0..grid.height() {
        packed.fill(0);
        for (x, &cell) in grid.view().row(y).iter().enumerate() {
            if cell == 0 {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.write_all(&packed)?;
    }
    out.flush()
}
