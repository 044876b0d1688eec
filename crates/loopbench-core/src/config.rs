//! Benchmark configuration
//!
//! All values are resolved before the harness starts and are immutable for
//! the lifetime of the process. The defaults reproduce the classic codelet
//! dimensions; tests shrink them to a 40-element working set.

use crate::error::{Error, Result};

/// Default 1-D vector length. Must be a positive multiple of 40.
pub const DEFAULT_LEN_1D: usize = 32000;

/// Default matrix dimension (matrices are `LEN_2D x LEN_2D`).
pub const DEFAULT_LEN_2D: usize = 256;

/// Default outer-iteration scale constant shared by all kernels.
pub const DEFAULT_ITERATIONS: usize = 100_000;

/// Byte alignment of every workspace array, sized for 512-bit vectors.
pub const ARRAY_ALIGNMENT: usize = 64;

/// Fixed configuration consumed by the workspace and harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Length of the 1-D vectors and the discriminant array.
    pub len_1d: usize,
    /// Dimension of the square matrices; the flat buffer holds `len_2d^2`.
    pub len_2d: usize,
    /// Global iteration constant each kernel scales per its loop complexity.
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            len_1d: DEFAULT_LEN_1D,
            len_2d: DEFAULT_LEN_2D,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl BenchConfig {
    /// Build a validated configuration.
    ///
    /// `len_1d` must be a positive multiple of 40. `len_2d` must be at least
    /// 2 (several kernels start inner loops at index 1) and no larger than
    /// `len_1d`, because a handful of kernels walk the 1-D vectors with
    /// matrix bounds.
    pub fn new(len_1d: usize, len_2d: usize, iterations: usize) -> Result<Self> {
        if len_1d == 0 || len_1d % 40 != 0 {
            return Err(Error::bad_length("len_1d", len_1d));
        }
        if len_2d < 2 {
            return Err(Error::InvalidConfig(format!(
                "len_2d must be at least 2, got {len_2d}"
            )));
        }
        if len_2d > len_1d {
            return Err(Error::InvalidConfig(format!(
                "len_2d ({len_2d}) must not exceed len_1d ({len_1d})"
            )));
        }
        if iterations == 0 {
            return Err(Error::InvalidConfig(
                "iterations must be positive".to_string(),
            ));
        }
        Ok(Self {
            len_1d,
            len_2d,
            iterations,
        })
    }
}
