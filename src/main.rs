//! Benchmark driver: runs the full kernel catalog over the default
//! configuration and writes the three-column report to stdout.
//!
//! Exits with a success status on completion. The non-local-exit kernel may
//! also end the process early with a success status when its data condition
//! fires; callers must treat that as a designed outcome, not a failure.

use anyhow::Result;

use loopbench::{BenchConfig, Harness, Workspace};

fn main() -> Result<()> {
    env_logger::init();

    let cfg = BenchConfig::default();
    log::info!(
        "len_1d={} len_2d={} iterations={}",
        cfg.len_1d,
        cfg.len_2d,
        cfg.iterations
    );

    let mut ws = Workspace::new(&cfg);
    let stdout = std::io::stdout().lock();
    let mut harness = Harness::new(cfg, stdout);
    harness.run(&mut ws, loopbench::catalog())?;
    Ok(())
}
