//! Column-slice fan-out for one generation.
//!
//! The column range `[0, width)` is cut into contiguous slices, one per worker.
//! Each worker walks every row of its slice, reads neighbors from the shared
//! `current` view and writes only its own segment of each `next` row. Segments
//! are carved out of `next` with `split_at_mut`, so ownership of every scratch
//! cell is exclusive for the whole step. The rayon scope is the join barrier;
//! buffers are swapped only after it returns.
//!
//! The cell buffers are never reallocated. Each parallel step does allocate
//! the lane lists: one `Vec` of `height` row segments per worker, dropped when
//! the step ends, since the segments borrow `next` for that step only.

use std::ops::Range;

use super::grid::{CellsView, Grid, count_in_rows};
use super::rules::next_liveness;

/// Partition `[0, width)` into `workers` contiguous slices of `width / workers`
/// columns. Columns left over by the integer division go to the last slice.
/// `workers` is clamped to `1..=width`, so no slice is empty.
pub fn column_slices(width: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, width.max(1));
    let span = width / workers;
    (0..workers)
        .map(|i| {
            let start = i * span;
            let end = if i + 1 == workers { width } else { start + span };
            start..end
        })
        .collect()
}

/// One generation on the calling thread: a single slice covering the width.
pub fn advance_serial(grid: &mut Grid) {
    let width = grid.width();
    {
        let (view, next) = grid.split_buffers();
        let lane: Vec<&mut [u8]> = next.chunks_exact_mut(width).collect();
        update_slice(view, 0..width, lane);
    }
    grid.swap_buffers();
}

/// One generation fanned out over `workers` slices on `pool`.
pub fn advance_parallel(grid: &mut Grid, pool: &rayon::ThreadPool, workers: usize) {
    let slices = column_slices(grid.width(), workers);
    if slices.len() == 1 {
        advance_serial(grid);
        return;
    }

    let width = grid.width();
    {
        let (view, next) = grid.split_buffers();
        let lanes = carve_lanes(next, width, view.height(), &slices);
        pool.scope(|scope| {
            for (range, lane) in slices.iter().cloned().zip(lanes) {
                scope.spawn(move |_| update_slice(view, range, lane));
            }
        });
    }
    grid.swap_buffers();
}

/// Split `next` into one lane per slice; a lane holds that slice's segment of
/// every row, top to bottom.
fn carve_lanes<'a>(
    next: &'a mut [u8],
    width: usize,
    height: usize,
    slices: &[Range<usize>],
) -> Vec<Vec<&'a mut [u8]>> {
    let mut lanes: Vec<Vec<&'a mut [u8]>> =
        slices.iter().map(|_| Vec::with_capacity(height)).collect();
    for row in next.chunks_exact_mut(width) {
        let mut rest = row;
        for (lane, range) in lanes.iter_mut().zip(slices) {
            let remaining = std::mem::take(&mut rest);
            let (segment, tail) = remaining.split_at_mut(range.len());
            lane.push(segment);
            rest = tail;
        }
        debug_assert!(rest.is_empty());
    }
    lanes
}

/// Compute columns `range` of every row into `lane` (one segment per row,
/// indexed from `range.start`).
fn update_slice(view: CellsView<'_>, range: Range<usize>, lane: Vec<&mut [u8]>) {
    debug_assert_eq!(lane.len(), view.height());
    for (y, segment) in lane.into_iter().enumerate() {
        let (north, row, south) = view.rows_around(y);
        for (out, x) in segment.iter_mut().zip(range.clone()) {
            let neighbors = count_in_rows(north, row, south, x);
            *out = next_liveness(row[x] != 0, neighbors) as u8;
        }
    }
}
