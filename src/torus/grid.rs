//! Double-buffered toroidal cell arena.
//!
//! Cells are stored one byte each (0 or 1) in two row-major `Vec<u8>`s of
//! `width * height` entries: `current` (read side) and `next` (write side).
//! A generation reads only `current`, writes only `next`, then exchanges the
//! two vectors. Neither buffer is reallocated after construction.

use super::lcg::Lcg;
use super::schedule;

pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<u8>,
    next: Vec<u8>,
}

impl Grid {
    /// All-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("grid of {width}x{height} cells overflows usize"));
        Self {
            width,
            height,
            current: vec![0; len],
            next: vec![0; len],
        }
    }

    /// Grid seeded with one generator bit per cell in row-major order.
    pub fn seeded(width: usize, height: usize, lcg: &mut Lcg) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.current.iter_mut() {
            *cell = lcg.next_bit();
        }
        grid
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Current generation, row-major.
    #[inline(always)]
    pub fn cells(&self) -> &[u8] {
        &self.current
    }

    #[inline(always)]
    pub fn view(&self) -> CellsView<'_> {
        CellsView {
            cells: &self.current,
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.view().at(x, y)
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.at(x, y) != 0
    }

    #[inline]
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        self.view().neighbor_count(x, y)
    }

    /// Write a cell of the current generation. Used for seeding patterns.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.current[idx] = alive as u8;
    }

    /// Write a cell of the scratch generation.
    pub fn set_next(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.next[idx] = alive as u8;
    }

    /// Exchange `current` and `next` without touching their contents.
    #[inline(always)]
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Advance one generation on the calling thread.
    pub fn advance(&mut self) {
        schedule::advance_serial(self);
    }

    pub fn population(&self) -> u64 {
        self.current.iter().map(|&c| c as u64).sum()
    }

    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (y, row) in self.current.chunks_exact(self.width).enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    f(x, y);
                }
            }
        }
    }

    /// Read view of `current` together with the whole `next` buffer.
    #[inline(always)]
    pub(crate) fn split_buffers(&mut self) -> (CellsView<'_>, &mut [u8]) {
        let view = CellsView {
            cells: &self.current,
            width: self.width,
            height: self.height,
        };
        (view, &mut self.next)
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width, "x {x} out of bounds (width {})", self.width);
        assert!(y < self.height, "y {y} out of bounds (height {})", self.height);
        y * self.width + x
    }
}

/// Read-only view of one generation. `Copy`, so every worker can hold one.
#[derive(Clone, Copy)]
pub struct CellsView<'a> {
    cells: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> CellsView<'a> {
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "x {x} out of bounds (width {})", self.width);
        self.row(y)[x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "y {y} out of bounds (height {})", self.height);
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows `y - 1`, `y`, `y + 1`, wrapping vertically.
    #[inline(always)]
    pub fn rows_around(&self, y: usize) -> (&'a [u8], &'a [u8], &'a [u8]) {
        let north = if y == 0 { self.height - 1 } else { y - 1 };
        let south = if y + 1 == self.height { 0 } else { y + 1 };
        (self.row(north), self.row(y), self.row(south))
    }

    /// Live cells among the 8 toroidal neighbors of `(x, y)`.
    #[inline]
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "x {x} out of bounds (width {})", self.width);
        let (north, row, south) = self.rows_around(y);
        count_in_rows(north, row, south, x)
    }
}

/// Sum of the 8 neighbors of column `x` given its row and the rows around it.
/// Columns wrap modulo the row length.
#[inline(always)]
pub(crate) fn count_in_rows(north: &[u8], row: &[u8], south: &[u8], x: usize) -> u8 {
    let w = row.len();
    let west = if x == 0 { w - 1 } else { x - 1 };
    let east = if x + 1 == w { 0 } else { x + 1 };
    north[west] + north[x] + north[east] + row[west] + row[east] + south[west] + south[x] + south[east]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &(x, y) in live {
            grid.set_cell(x, y, true);
        }
        grid
    }

    #[test]
    fn corner_cell_wraps_to_all_eight_neighbors() {
        let (w, h) = (6, 5);
        let grid = grid_with(w, h, &[(0, 0)]);
        let expected = [
            (w - 1, h - 1),
            (0, h - 1),
            (1, h - 1),
            (w - 1, 0),
            (1, 0),
            (w - 1, 1),
            (0, 1),
            (1, 1),
        ];
        for y in 0..h {
            for x in 0..w {
                let want = expected.contains(&(x, y)) as u8;
                assert_eq!(grid.neighbor_count(x, y), want, "neighbor count at ({x},{y})");
            }
        }
    }

    #[test]
    fn full_grid_counts_eight_everywhere() {
        let mut grid = Grid::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                grid.set_cell(x, y, true);
            }
        }
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.neighbor_count(x, y), 8);
            }
        }
    }

    #[test]
    fn seeded_grid_follows_generator_order() {
        let mut lcg = Lcg::default();
        let grid = Grid::seeded(16, 2, &mut lcg);
        let expected: [u8; 32] = [
            0, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, //
            0, 0, 0, 1, 1, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1,
        ];
        assert_eq!(grid.cells(), &expected);
        assert_eq!(grid.at(2, 0), 1);
        assert_eq!(grid.at(3, 1), 1);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn new_rejects_overflowing_dimensions() {
        Grid::new(usize::MAX / 2 + 1, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn at_rejects_x_past_width() {
        let grid = Grid::new(4, 4);
        grid.at(4, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_next_rejects_y_past_height() {
        let mut grid = Grid::new(4, 4);
        grid.set_next(0, 4, true);
    }

    #[test]
    fn set_next_is_invisible_until_swap() {
        let mut grid = Grid::new(3, 3);
        grid.set_next(1, 1, true);
        assert!(!grid.is_alive(1, 1));
        grid.swap_buffers();
        assert!(grid.is_alive(1, 1));
    }

    #[test]
    fn advance_exchanges_buffers_without_reallocating() {
        let mut lcg = Lcg::default();
        let mut grid = Grid::seeded(32, 24, &mut lcg);
        let a = grid.current.as_ptr();
        let b = grid.next.as_ptr();
        let capacity = (grid.current.capacity(), grid.next.capacity());

        grid.advance();
        assert_eq!(grid.current.as_ptr(), b);
        assert_eq!(grid.next.as_ptr(), a);

        for _ in 0..99 {
            grid.advance();
        }
        // 100 swaps: back to the original pairing.
        assert_eq!(grid.current.as_ptr(), a);
        assert_eq!(grid.next.as_ptr(), b);
        assert_eq!((grid.current.capacity(), grid.next.capacity()), capacity);
    }

    #[test]
    fn block_is_still_life() {
        let block = [(3, 3), (4, 3), (3, 4), (4, 4)];
        let mut grid = grid_with(8, 8, &block);
        for _ in 0..10 {
            grid.advance();
        }
        assert_eq!(grid.population(), 4);
        for &(x, y) in &block {
            assert!(grid.is_alive(x, y));
        }
    }

    #[test]
    fn block_straddling_the_seam_is_still_life() {
        let block = [(7, 7), (0, 7), (7, 0), (0, 0)];
        let mut grid = grid_with(8, 8, &block);
        for _ in 0..5 {
            grid.advance();
        }
        let mut live = Vec::new();
        grid.for_each_live(|x, y| live.push((x, y)));
        assert_eq!(live, vec![(0, 0), (7, 0), (0, 7), (7, 7)]);
    }
}
