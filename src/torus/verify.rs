//! Run-length fingerprints of a generation and exact comparison against a
//! reference.
//!
//! A fingerprint is `[state of cell 0, run, run, ...]` where each run is the
//! length of a maximal stretch of equal cells in row-major order. Two grids of
//! the same shape are identical iff their fingerprints are.

use log::warn;
use thiserror::Error;

use super::grid::Grid;

const BUILTIN_REFERENCE: &str = include_str!("../../data/reference_640x400_g2000.rle");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("line {line}: unknown header key `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("missing header `{0}`")]
    MissingHeader(&'static str),
    #[error("missing `runs` section")]
    MissingRuns,
    #[error("first value must be a cell state (0 or 1), got {0}")]
    InvalidFirstState(u32),
    #[error("zero-length run at position {0}")]
    ZeroRun(usize),
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("runs cover {covered} cells but the grid has {cells}")]
    CoverageMismatch { covered: u64, cells: u64 },
}

/// Fingerprint of `cells`. Empty input yields an empty fingerprint.
pub fn run_lengths(cells: &[u8]) -> Vec<u32> {
    let Some((&first, rest)) = cells.split_first() else {
        return Vec::new();
    };
    let mut out = vec![first as u32];
    let mut state = first;
    let mut count = 1u32;
    for &cell in rest {
        if cell == state {
            count += 1;
        } else {
            out.push(count);
            state = cell;
            count = 1;
        }
    }
    out.push(count);
    out
}

/// Compare the current generation of `grid` against `reference`, stopping at
/// the first disagreement. Requires the same first state, every run length and
/// the same number of runs.
pub fn check(grid: &Grid, reference: &[u32]) -> bool {
    let Some((&first, rest)) = grid.cells().split_first() else {
        return reference.is_empty();
    };
    let mut expected = reference.iter().copied();
    if expected.next() != Some(first as u32) {
        return false;
    }
    let mut state = first;
    let mut count = 1u32;
    for &cell in rest {
        if cell == state {
            count += 1;
        } else {
            if expected.next() != Some(count) {
                return false;
            }
            state = cell;
            count = 1;
        }
    }
    expected.next() == Some(count) && expected.next().is_none()
}

/// A known-good fingerprint together with the run that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    width: usize,
    height: usize,
    generations: u64,
    seed: u32,
    runs: Vec<u32>,
}

impl Reference {
    /// 640x400 torus, LCG state 0, after 2000 generations.
    pub fn builtin() -> Result<Self, ReferenceError> {
        Self::parse(BUILTIN_REFERENCE)
    }

    /// Parse the text format:
    ///
    /// ```text
    /// # comment
    /// width 640
    /// height 400
    /// generations 2000
    /// seed 0
    /// runs
    /// 0 19 2 3 ...
    /// ```
    ///
    /// `seed` is optional and defaults to 0.
    pub fn parse(text: &str) -> Result<Self, ReferenceError> {
        let mut width = None;
        let mut height = None;
        let mut generations = None;
        let mut seed = 0u32;
        let mut runs: Option<Vec<u32>> = None;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(runs) = runs.as_mut() {
                for token in line.split_whitespace() {
                    runs.push(parse_number(token, line_no)?);
                }
                continue;
            }
            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or_default();
            if key == "runs" {
                runs = Some(Vec::new());
                continue;
            }
            let token = parts.next().unwrap_or_default();
            match key {
                "width" => width = Some(parse_number::<usize>(token, line_no)?),
                "height" => height = Some(parse_number::<usize>(token, line_no)?),
                "generations" => generations = Some(parse_number::<u64>(token, line_no)?),
                "seed" => seed = parse_number(token, line_no)?,
                _ => {
                    return Err(ReferenceError::UnknownKey {
                        line: line_no,
                        key: key.to_string(),
                    });
                }
            }
        }

        let width = width.ok_or(ReferenceError::MissingHeader("width"))?;
        let height = height.ok_or(ReferenceError::MissingHeader("height"))?;
        let generations = generations.ok_or(ReferenceError::MissingHeader("generations"))?;
        let runs = runs.ok_or(ReferenceError::MissingRuns)?;

        let Some((&first, lengths)) = runs.split_first() else {
            return Err(ReferenceError::MissingRuns);
        };
        if first > 1 {
            return Err(ReferenceError::InvalidFirstState(first));
        }
        if let Some(pos) = lengths.iter().position(|&run| run == 0) {
            return Err(ReferenceError::ZeroRun(pos + 1));
        }
        let covered: u64 = lengths.iter().map(|&run| run as u64).sum();
        let cells = width
            .checked_mul(height)
            .ok_or(ReferenceError::TooLarge { width, height })? as u64;
        if covered != cells {
            return Err(ReferenceError::CoverageMismatch { covered, cells });
        }

        Ok(Self {
            width,
            height,
            generations,
            seed,
            runs,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    /// Exact match of `grid`, including its dimensions.
    pub fn check(&self, grid: &Grid) -> bool {
        if grid.width() != self.width || grid.height() != self.height {
            warn!(
                "reference is {}x{}, grid is {}x{}",
                self.width,
                self.height,
                grid.width(),
                grid.height()
            );
            return false;
        }
        check(grid, &self.runs)
    }
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ReferenceError> {
    token.parse().map_err(|_| ReferenceError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
