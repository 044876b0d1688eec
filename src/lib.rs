//! Compiler vectorization measurement harness
//!
//! A correctness-preserving benchmark for comparing how well compilers and
//! optimization flags vectorize numeric loops with classic data-dependence
//! patterns: recurrences, induction variables, packed-triangular walks,
//! guarded updates, reductions, packing, searches, and non-local exits.
//!
//! The crate is a thin facade over two workspace members:
//!
//! - [`loopbench_core`] - the measurement protocol: aligned workspace
//!   arrays, deterministic initialization, checksum reduction, the
//!   anti-elimination sink, and the timing/reporting harness
//! - [`loopbench_kernels`] - the catalog of loop kernels, one per
//!   dependence-pattern archetype instance, in a fixed invocation order
//!
//! # Example
//!
//! ```no_run
//! use loopbench::{BenchConfig, Harness, Workspace};
//!
//! let cfg = BenchConfig::default();
//! let mut ws = Workspace::new(&cfg);
//! let mut harness = Harness::new(cfg, std::io::stdout().lock());
//! harness.run(&mut ws, loopbench::catalog()).unwrap();
//! ```

pub use loopbench_core::{
    checksum, initialise, ArraySet, BenchConfig, Error, Harness, Invocation, Kernel, Params,
    Real, RepScale, Result, Workspace,
};
pub use loopbench_kernels::catalog;
