#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod args;

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::thread;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use torus_life::snapshot::write_pbm;
use torus_life::torus::driver::{self, NullSink, StopFlag};
use torus_life::{Reference, TorusLife};

use args::Args;

/// Request a stop when a line arrives on stdin. EOF is ignored so the run is
/// unaffected when stdin is closed or redirected.
fn watch_stdin(stop: StopFlag) {
    let spawned = thread::Builder::new()
        .name("stdin-watch".to_string())
        .spawn(move || {
            let mut line = String::new();
            if let Ok(n) = io::stdin().read_line(&mut line) {
                if n > 0 {
                    info!("input received, stopping after the current generation");
                    stop.request();
                }
            }
        });
    if let Err(err) = spawned {
        warn!("early stop via stdin unavailable: {err}");
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let mut engine = TorusLife::with_config(args.config()).context("failed to set up engine")?;

    let stop = StopFlag::new();
    watch_stdin(stop.clone());

    let summary = driver::run(&mut engine, args.generations, &mut NullSink, &stop);

    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot {}", path.display()))?;
        write_pbm(engine.grid(), BufWriter::new(file))
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!("wrote generation {} to {}", engine.generation(), path.display());
    }

    if args.no_verify {
        return Ok(ExitCode::SUCCESS);
    }

    let reference = Reference::builtin().context("failed to load built-in reference")?;
    if summary.generations != reference.generations() || args.seed != reference.seed() {
        warn!(
            "reference was recorded after {} generations from seed {}, this run did {} from seed {}",
            reference.generations(),
            reference.seed(),
            summary.generations,
            args.seed
        );
    }

    if engine.verify(&reference) {
        info!("OK");
        Ok(ExitCode::SUCCESS)
    } else {
        error!("verification failed");
        Ok(ExitCode::FAILURE)
    }
}
