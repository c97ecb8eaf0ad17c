//! Generation loop and its boundary with display/input collaborators.
//!
//! The loop advances the engine, hands each finished generation to a
//! [`FrameSink`] (after the buffer swap, never during a step) and polls a
//! [`StopFlag`] between generations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info};

use super::engine::TorusLife;
use super::grid::Grid;

const PROGRESS_INTERVAL: u64 = 250;

/// Consumer of finished generations. Read-only.
pub trait FrameSink {
    fn present(&mut self, generation: u64, grid: &Grid);
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _generation: u64, _grid: &Grid) {}
}

impl<F: FnMut(u64, &Grid)> FrameSink for F {
    fn present(&mut self, generation: u64, grid: &Grid) {
        self(generation, grid)
    }
}

/// Shared early-termination request.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub generations: u64,
    pub elapsed: Duration,
    pub stopped_early: bool,
}

impl RunSummary {
    pub fn generations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.generations as f64 / secs
        } else {
            0.0
        }
    }
}

/// Advance up to `limit` generations, presenting each one to `sink`.
pub fn run<S: FrameSink + ?Sized>(
    engine: &mut TorusLife,
    limit: u64,
    sink: &mut S,
    stop: &StopFlag,
) -> RunSummary {
    let start = Instant::now();
    let mut generations = 0u64;

    while generations < limit {
        if stop.is_requested() {
            info!("stop requested after {generations} generation(s)");
            break;
        }
        engine.step();
        generations += 1;
        sink.present(engine.generation(), engine.grid());

        if generations % PROGRESS_INTERVAL == 0 {
            debug!(
                "generation {}: population {}",
                engine.generation(),
                engine.population()
            );
        }
    }

    let summary = RunSummary {
        generations,
        elapsed: start.elapsed(),
        stopped_early: generations < limit,
    };
    info!(
        "{} generations, {} ms => {:.1} GPS",
        summary.generations,
        summary.elapsed.as_millis(),
        summary.generations_per_second()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::torus::engine::TorusLifeConfig;

    fn small_engine() -> TorusLife {
        TorusLife::with_config(TorusLifeConfig::default().size(24, 16).thread_count(2)).unwrap()
    }

    #[test_log::test]
    fn runs_to_limit_and_presents_every_generation() {
        let mut engine = small_engine();
        let mut seen = Vec::new();
        let mut sink = |generation: u64, grid: &Grid| {
            assert_eq!((grid.width(), grid.height()), (24, 16));
            seen.push(generation);
        };
        let summary = run(&mut engine, 5, &mut sink, &StopFlag::new());

        assert_eq!(summary.generations, 5);
        assert!(!summary.stopped_early);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(engine.generation(), 5);
    }

    #[test_log::test]
    fn pre_requested_stop_runs_nothing() {
        let mut engine = small_engine();
        let before = engine.grid().cells().to_vec();
        let stop = StopFlag::new();
        stop.request();

        let summary = run(&mut engine, 100, &mut NullSink, &stop);

        assert_eq!(summary.generations, 0);
        assert!(summary.stopped_early);
        assert_eq!(engine.grid().cells(), before.as_slice());
    }

    #[test_log::test]
    fn stop_requested_by_sink_halts_between_generations() {
        let mut engine = small_engine();
        let stop = StopFlag::new();
        let remote = stop.clone();
        let mut sink = move |generation: u64, _grid: &Grid| {
            if generation == 3 {
                remote.request();
            }
        };

        let summary = run(&mut engine, 2000, &mut sink, &stop);

        assert_eq!(summary.generations, 3);
        assert!(summary.stopped_early);
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn zero_elapsed_reports_zero_rate() {
        let summary = RunSummary {
            generations: 10,
            elapsed: Duration::ZERO,
            stopped_early: false,
        };
        assert_eq!(summary.generations_per_second(), 0.0);
    }
}
