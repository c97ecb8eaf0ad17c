use std::sync::OnceLock;

use log::{debug, info};
use thiserror::Error;

use super::grid::Grid;
use super::lcg::Lcg;
use super::schedule::{advance_parallel, advance_serial, column_slices};
use super::verify::Reference;

pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 400;

static LOGICAL_CORES: OnceLock<usize> = OnceLock::new();

#[inline]
fn logical_core_count() -> usize {
    *LOGICAL_CORES.get_or_init(|| num_cpus::get().max(1))
}

/// Resolve the worker count from a config, falling back to auto-detect.
fn resolve_thread_count(config: &TorusLifeConfig) -> usize {
    let mut threads = config.thread_count.unwrap_or_else(logical_core_count);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.max(1)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid of {width}x{height} cells does not fit in memory")]
    TooLarge { width: usize, height: usize },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a TorusLife engine instance.
///
/// `TorusLifeConfig::default()` is the 640x400 torus seeded from LCG state 0
/// with one worker per logical core.
#[derive(Clone, Debug)]
pub struct TorusLifeConfig {
    pub width: usize,
    pub height: usize,
    /// Number of column slices (and pool threads) per generation.
    /// `None` means one per logical core.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    pub max_threads: Option<usize>,
    /// Initial LCG state used to seed the grid.
    pub seed: u32,
}

impl Default for TorusLifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            thread_count: None,
            max_threads: None,
            seed: 0,
        }
    }
}

impl TorusLifeConfig {
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set an explicit thread count.
    pub fn thread_count(mut self, n: usize) -> Self {
        if n == 0 {
            debug!("thread count 0 requested, using 1");
        }
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set a hard upper bound on threads.
    pub fn max_threads(mut self, n: usize) -> Self {
        if n == 0 {
            debug!("thread cap 0 requested, using 1");
        }
        self.max_threads = Some(n.max(1));
        self
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

pub struct TorusLife {
    grid: Grid,
    generation: u64,
    threads: usize,
    pool: Option<rayon::ThreadPool>,
}

impl TorusLife {
    /// Engine over the default 640x400 torus.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(TorusLifeConfig::default())
    }

    pub fn with_config(config: TorusLifeConfig) -> Result<Self, ConfigError> {
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: config.width,
                height: config.height,
            });
        }
        if config.width.checked_mul(config.height).is_none() {
            return Err(ConfigError::TooLarge {
                width: config.width,
                height: config.height,
            });
        }
        let grid = Grid::seeded(config.width, config.height, &mut Lcg::new(config.seed));
        Self::from_grid(grid, &config)
    }

    /// Engine over an existing grid. Size and seed in `config` are ignored.
    pub fn from_grid(grid: Grid, config: &TorusLifeConfig) -> Result<Self, ConfigError> {
        // More slices than columns would leave workers idle.
        let threads = resolve_thread_count(config).min(grid.width());
        let pool = if threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("torus-life-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        info!(
            "{}x{} torus, {} worker(s), slices {:?}",
            grid.width(),
            grid.height(),
            threads,
            column_slices(grid.width(), threads)
                .iter()
                .map(|r| r.len())
                .collect::<Vec<_>>()
        );
        Ok(Self {
            grid,
            generation: 0,
            threads,
            pool,
        })
    }

    pub fn step(&mut self) {
        match &self.pool {
            Some(pool) => advance_parallel(&mut self.grid, pool, self.threads),
            None => advance_serial(&mut self.grid),
        }
        self.generation += 1;
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
        debug!("advanced {n} generation(s), now at {}", self.generation);
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.threads
    }

    /// Current generation, read-only.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get_cell(&self, x: usize, y: usize) -> bool {
        self.grid.is_alive(x, y)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        self.grid.set_cell(x, y, alive);
    }

    pub fn population(&self) -> u64 {
        self.grid.population()
    }

    pub fn for_each_live<F: FnMut(usize, usize)>(&self, f: F) {
        self.grid.for_each_live(f);
    }

    /// Compare the current generation against `reference`.
    pub fn verify(&self, reference: &Reference) -> bool {
        reference.check(&self.grid)
    }
}
