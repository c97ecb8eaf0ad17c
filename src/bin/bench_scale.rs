use std::time::Instant;
use torus_life::{TorusLife, TorusLifeConfig};

fn bench_torus(width: usize, height: usize, threads: usize, iterations: u64) -> (f64, u64) {
    let config = TorusLifeConfig::default()
        .size(width, height)
        .thread_count(threads);
    let mut engine = TorusLife::with_config(config).expect("failed to build engine");

    let start = Instant::now();
    engine.step_n(iterations);
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    (total_ms, engine.population())
}

fn main() {
    let grids: &[(usize, usize, u64)] = &[
        (640, 400, 500),   // reference size
        (1024, 1024, 100), // ~1M cells
        (4096, 1024, 25),  // wide, many columns per slice
    ];
    let max_threads = num_cpus::get().max(1);
    let mut thread_counts = vec![1usize];
    while let Some(&last) = thread_counts.last() {
        if last * 2 > max_threads {
            break;
        }
        thread_counts.push(last * 2);
    }
    if thread_counts.last() != Some(&max_threads) {
        thread_counts.push(max_threads);
    }

    println!(
        "{:<12} {:>8} {:>8} {:>12} {:>10} {:>10}",
        "Grid", "Threads", "Iters", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(66));

    for &(width, height, iters) in grids {
        for &threads in &thread_counts {
            let (total_ms, pop) = bench_torus(width, height, threads, iters);
            let avg_ms = total_ms / iters as f64;
            println!(
                "{:<12} {:>8} {:>8} {:>12.1} {:>10.4} {:>10}",
                format!("{}x{}", width, height),
                threads,
                iters,
                total_ms,
                avg_ms,
                pop
            );
        }
    }
}
