//! Timing and reporting harness
//!
//! Invokes every registered kernel strictly sequentially, in declaration
//! order, and emits one three-column report row per kernel: name, elapsed
//! wall seconds for the outer-repetition loop, and the returned scalar.

use std::io::Write;

use crate::config::BenchConfig;
use crate::error::Result;
use crate::invocation::{Invocation, Params};
use crate::workspace::Workspace;
use crate::Real;

/// How a kernel's outer-repetition count derives from the global iteration
/// constant. O(n) and O(n^2) bodies divide by the matrix dimension so total
/// work stays roughly uniform across kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepScale {
    /// `m * iterations`
    Times(usize),
    /// `iterations / d`
    Frac(usize),
    /// `m * (iterations / len_2d)`
    PerMatrix(usize),
}

impl RepScale {
    /// Resolve the concrete repetition count for a configuration.
    pub fn resolve(&self, cfg: &BenchConfig) -> usize {
        match *self {
            RepScale::Times(m) => m * cfg.iterations,
            RepScale::Frac(d) => cfg.iterations / d,
            RepScale::PerMatrix(m) => m * (cfg.iterations / cfg.len_2d),
        }
    }
}

/// A kernel entry point: mutates the workspace in place, writes its own
/// timestamps into the invocation, and returns its result scalar.
pub type KernelFn = fn(&mut Workspace, &mut Invocation) -> Real;

/// One registered kernel: declared name, repetition scaling, designated
/// parameter block, and entry point.
#[derive(Clone, Copy)]
pub struct Kernel {
    pub name: &'static str,
    pub reps: RepScale,
    pub params: Params,
    pub run: KernelFn,
}

/// Sequential driver that times kernels and writes the report.
pub struct Harness<W: Write> {
    cfg: BenchConfig,
    out: W,
}

impl<W: Write> Harness<W> {
    pub fn new(cfg: BenchConfig, out: W) -> Self {
        Self { cfg, out }
    }

    /// Run every kernel in declaration order, emitting the header and one
    /// row per kernel.
    pub fn run(&mut self, ws: &mut Workspace, kernels: &[Kernel]) -> Result<()> {
        writeln!(self.out, "Loop\tTime(sec)\tChecksum")?;
        for kernel in kernels {
            self.run_one(ws, kernel)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Run a single kernel and emit its report row. Returns the kernel's
    /// result scalar for callers that want to inspect it.
    pub fn run_one(&mut self, ws: &mut Workspace, kernel: &Kernel) -> Result<Real> {
        let reps = kernel.reps.resolve(&self.cfg);
        log::debug!("running {} with {} outer repetitions", kernel.name, reps);

        let mut ctx = Invocation::new(reps, kernel.params);
        let result = (kernel.run)(ws, &mut ctx);
        let seconds = ctx.elapsed().as_secs_f64();

        writeln!(self.out, "{:<8}\t{:10.3}\t{:.6}", kernel.name, seconds, result)?;
        Ok(result)
    }

    /// The configuration this harness was built with.
    pub fn config(&self) -> &BenchConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::initialise;

    #[test]
    fn test_rep_scale_resolution() {
        let cfg = BenchConfig::new(40, 8, 100).unwrap();
        assert_eq!(RepScale::Times(3).resolve(&cfg), 300);
        assert_eq!(RepScale::Frac(2).resolve(&cfg), 50);
        assert_eq!(RepScale::PerMatrix(10).resolve(&cfg), 120);
        // Integer division truncates, exactly like the original scaling.
        let tiny = BenchConfig::new(40, 8, 3).unwrap();
        assert_eq!(RepScale::PerMatrix(10).resolve(&tiny), 0);
        assert_eq!(RepScale::Frac(5).resolve(&tiny), 0);
    }

    fn doubling_kernel(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
        initialise(ws, "doubling");
        ctx.start_timer();
        for _ in 0..ctx.reps {
            for i in 0..ws.len_1d() {
                ws.a[i] += ws.a[i];
            }
            ctx.sink(ws, 0.0);
        }
        ctx.stop_timer();
        crate::checksum(ws, "doubling-test")
    }

    #[test]
    fn test_run_one_emits_single_row() {
        let cfg = BenchConfig::new(40, 8, 4).unwrap();
        let mut ws = Workspace::new(&cfg);
        let mut out = Vec::new();
        let kernel = Kernel {
            name: "dbl",
            reps: RepScale::Times(1),
            params: Params::None,
            run: doubling_kernel,
        };

        let result = {
            let mut harness = Harness::new(cfg, &mut out);
            harness.run_one(&mut ws, &kernel).unwrap()
        };

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("dbl"));
        let fields: Vec<&str> = lines[0].split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert!(fields[1].trim().parse::<f64>().is_ok());
        let reported: f64 = fields[2].trim().parse().unwrap();
        assert!((reported - result as f64).abs() < 1e-4);
    }

    #[test]
    fn test_run_preserves_declaration_order() {
        let cfg = BenchConfig::new(40, 8, 2).unwrap();
        let mut ws = Workspace::new(&cfg);
        let kernels = [
            Kernel {
                name: "first",
                reps: RepScale::Times(1),
                params: Params::None,
                run: doubling_kernel,
            },
            Kernel {
                name: "second",
                reps: RepScale::Frac(2),
                params: Params::None,
                run: doubling_kernel,
            },
        ];

        let mut out = Vec::new();
        Harness::new(cfg, &mut out).run(&mut ws, &kernels).unwrap();

        let text = String::from_utf8(out).unwrap();
        let names: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(names, ["first", "second"]);
        assert!(text.starts_with("Loop\tTime(sec)\tChecksum"));
    }
}
