//! Per-call kernel context: parameters, repetitions, timestamps, sink
//!
//! The harness creates a fresh [`Invocation`] for every kernel call and
//! discards it once the report row is emitted. The kernel itself writes the
//! two timestamps so that only the outer-repetition loop is measured;
//! checksum reduction happens after the timer stops.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::workspace::Workspace;
use crate::Real;

/// Opaque parameter block for the minority of kernels that take one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Params {
    /// No parameters (most kernels).
    None,
    /// A pair of additive scalars.
    Pair(Real, Real),
    /// An index stride.
    Stride(usize),
    /// A search threshold.
    Threshold(Real),
}

impl Params {
    /// The scalar pair, or `default` if this block holds something else.
    #[inline]
    pub fn pair_or(&self, default: (Real, Real)) -> (Real, Real) {
        match *self {
            Params::Pair(s1, s2) => (s1, s2),
            _ => default,
        }
    }

    /// The stride, or `default` if this block holds something else.
    #[inline]
    pub fn stride_or(&self, default: usize) -> usize {
        match *self {
            Params::Stride(inc) => inc,
            _ => default,
        }
    }

    /// The threshold, or `default` if this block holds something else.
    #[inline]
    pub fn threshold_or(&self, default: Real) -> Real {
        match *self {
            Params::Threshold(t) => t,
            _ => default,
        }
    }
}

/// Context handed to a kernel for a single timed call.
pub struct Invocation {
    /// Parameter block designated for this kernel in the registry.
    pub params: Params,
    /// Resolved outer-repetition count; the kernel loops exactly this often.
    pub reps: usize,
    started: Option<Instant>,
    stopped: Option<Instant>,
    sink_calls: u64,
}

impl Invocation {
    /// Build a fresh context for one kernel call.
    pub fn new(reps: usize, params: Params) -> Self {
        Self {
            params,
            reps,
            started: None,
            stopped: None,
            sink_calls: 0,
        }
    }

    /// Mark the start of the outer-repetition loop.
    #[inline]
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Mark the end of the outer-repetition loop.
    #[inline]
    pub fn stop_timer(&mut self) {
        self.stopped = Some(Instant::now());
    }

    /// Wall time between the kernel-written timestamps, zero if a kernel
    /// never started or never stopped its timer.
    pub fn elapsed(&self) -> Duration {
        match (self.started, self.stopped) {
            (Some(t1), Some(t2)) => t2.duration_since(t1),
            _ => Duration::ZERO,
        }
    }

    /// How often the anti-elimination sink ran.
    #[inline]
    pub fn sink_calls(&self) -> u64 {
        self.sink_calls
    }

    /// Anti-elimination sink, called once per outer repetition.
    ///
    /// The optimizer must treat this as capable of observing every value in
    /// the workspace plus the scalar, otherwise the kernel body is dead
    /// code. The work done here is a counter bump and two `black_box`
    /// round-trips, negligible against any kernel body.
    #[inline(never)]
    pub fn sink(&mut self, ws: &Workspace, scalar: Real) {
        self.sink_calls += 1;
        black_box(ws);
        black_box(scalar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchConfig;

    #[test]
    fn test_params_accessors() {
        assert_eq!(Params::Pair(1.0, 2.0).pair_or((0.0, 0.0)), (1.0, 2.0));
        assert_eq!(Params::None.pair_or((3.0, 4.0)), (3.0, 4.0));
        assert_eq!(Params::Stride(2).stride_or(1), 2);
        assert_eq!(Params::Threshold(0.5).threshold_or(1.0), 0.5);
        assert_eq!(Params::None.threshold_or(1.0), 1.0);
    }

    #[test]
    fn test_elapsed_requires_both_timestamps() {
        let mut ctx = Invocation::new(1, Params::None);
        assert_eq!(ctx.elapsed(), Duration::ZERO);
        ctx.start_timer();
        assert_eq!(ctx.elapsed(), Duration::ZERO);
        ctx.stop_timer();
        // Stop minus start is non-negative and usually tiny.
        assert!(ctx.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sink_counts_calls() {
        let cfg = BenchConfig::new(40, 2, 1).unwrap();
        let ws = Workspace::new(&cfg);
        let mut ctx = Invocation::new(5, Params::None);
        for _ in 0..ctx.reps {
            ctx.sink(&ws, 0.0);
        }
        assert_eq!(ctx.sink_calls(), 5);
    }
}
