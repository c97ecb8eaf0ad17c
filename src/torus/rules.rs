//! B3/S23 transition.

/// Next liveness of a cell given its current state and live neighbor count.
#[inline(always)]
pub fn next_liveness(is_alive: bool, live_neighbors: u8) -> bool {
    match (is_alive, live_neighbors) {
        (true, 2) | (true, 3) => true,
        (false, 3) => true,
        _ => false,
    }
}
