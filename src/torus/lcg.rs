//! Deterministic seeding source.
//!
//! A 32-bit linear congruential generator (`A = 22695477`, `C = 1`). Only the
//! bit at position 23 of each new state is used to seed cells, so the arithmetic
//! must stay exactly as written for the reference fingerprints to hold.

const MULTIPLIER: u32 = 22_695_477;
const INCREMENT: u32 = 1;
const OUTPUT_SHIFT: u32 = 23;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline(always)]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and return its upper 9 bits.
    #[inline(always)]
    pub fn next_raw(&mut self) -> u32 {
        self.state = MULTIPLIER.wrapping_mul(self.state).wrapping_add(INCREMENT);
        self.state >> OUTPUT_SHIFT
    }

    /// Next seeding bit (0 or 1).
    #[inline(always)]
    pub fn next_bit(&mut self) -> u8 {
        (self.next_raw() & 1) as u8
    }
}
