//! Command line arguments for the torus-life binary.

use std::path::PathBuf;

use clap::Parser;
use torus_life::TorusLifeConfig;
use torus_life::torus::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Run Conway's Game of Life on a torus and verify the final generation
/// against the built-in run-length fingerprint.
///
/// Press Enter during the run to stop early.
#[derive(Parser, Debug)]
#[command(name = "torus-life", version)]
pub struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Number of generations to run
    #[arg(short = 'n', long, default_value_t = 2000)]
    pub generations: u64,

    /// Worker count (defaults to the number of logical cores)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Upper bound on the worker count
    #[arg(long)]
    pub max_threads: Option<usize>,

    /// Initial LCG state used to seed the grid
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    /// Write the final generation to this path as a PBM image
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Skip the reference check and always exit successfully
    #[arg(long)]
    pub no_verify: bool,
}

impl Args {
    pub fn config(&self) -> TorusLifeConfig {
        let mut config = TorusLifeConfig::default()
            .size(self.width, self.height)
            .seed(self.seed);
        if let Some(n) = self.threads {
            config = config.thread_count(n);
        }
        if let Some(n) = self.max_threads {
            config = config.max_threads(n);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let args = Args::parse_from(["torus-life"]);
        assert_eq!((args.width, args.height), (640, 400));
        assert_eq!(args.generations, 2000);
        assert_eq!(args.seed, 0);
        assert!(args.threads.is_none());
        assert!(!args.no_verify);
    }

    #[test]
    fn thread_flags_reach_config() {
        let args = Args::parse_from(["torus-life", "-t", "6", "--max-threads", "4", "--width", "64"]);
        let config = args.config();
        assert_eq!(config.thread_count, Some(6));
        assert_eq!(config.max_threads, Some(4));
        assert_eq!(config.width, 64);
    }
}
