//! Measurement harness core for compiler vectorization benchmarking
//!
//! This crate holds everything a loop kernel needs except the kernel body
//! itself:
//!
//! - [`Workspace`] - the shared, SIMD-aligned numeric arrays every kernel
//!   mutates in place
//! - [`initialise`] - deterministic repopulation of the workspace before
//!   every kernel run
//! - [`checksum::checksum`] - the scalar reduction used to detect numerical
//!   divergence between differently-optimized builds
//! - [`Invocation`] - per-call context: parameter block, outer-repetition
//!   count, kernel-written timestamps, and the anti-elimination sink
//! - [`Harness`] - sequential driver that times each kernel and emits the
//!   three-column report
//!
//! # Design Philosophy
//!
//! - **No hidden global state**: the workspace is an explicit value handed
//!   `&mut` to each kernel
//! - **Timing bounds only the repetition loop**: kernels write their own
//!   start/stop timestamps; checksum cost is never measured
//! - **Checksums are surfaced verbatim**: a mismatch across optimization
//!   levels is a detection signal, never something to round away

pub mod checksum;
pub mod config;
pub mod error;
pub mod harness;
pub mod init;
pub mod invocation;
pub mod workspace;

pub use checksum::{checksum, relevant_arrays, ArraySet};
pub use config::{
    BenchConfig, ARRAY_ALIGNMENT, DEFAULT_ITERATIONS, DEFAULT_LEN_1D, DEFAULT_LEN_2D,
};
pub use error::{Error, Result};
pub use harness::{Harness, Kernel, KernelFn, RepScale};
pub use init::initialise;
pub use invocation::{Invocation, Params};
pub use workspace::{AlignedVec, Matrix, Workspace};

/// Element type of the workspace arrays.
///
/// Defaults to `f32` to match the classic single-precision codelets; the
/// `f64` cargo feature widens every array and checksum.
#[cfg(feature = "f64")]
pub type Real = f64;

#[cfg(not(feature = "f64"))]
pub type Real = f32;
