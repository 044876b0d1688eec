//! Idiom-recognition kernels: reductions, recurrences, search loops, and
//! packing/unpacking.
//!
//! Several kernels here return a directly-computed reduction value instead
//! of the workspace checksum. That inconsistency is part of the observable
//! contract under test and is preserved per kernel.

use loopbench_core::{checksum, initialise, Invocation, Real, Workspace};

/// Sum of a four-element block, kept out of line of the unrolled caller.
fn sum4(block: &[Real]) -> Real {
    block[..4].iter().copied().sum()
}

/// Reduction: sum reduction over eight explicitly unrolled four-element
/// blocks.
pub fn s31111(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s31111");
    ctx.start_timer();
    for _ in 0..ctx.reps {
        let mut sum: Real = 0.0;
        sum += sum4(&ws.a);
        sum += sum4(&ws.a[4..]);
        sum += sum4(&ws.a[8..]);
        sum += sum4(&ws.a[12..]);
        sum += sum4(&ws.a[16..]);
        sum += sum4(&ws.a[20..]);
        sum += sum4(&ws.a[24..]);
        sum += sum4(&ws.a[28..]);
        ctx.sink(ws, sum);
    }
    ctx.stop_timer();
    checksum(ws, "s31111")
}

/// Reduction: max absolute value with index, stride from the parameter
/// block. Returns the reduction itself (one-based index) rather than a
/// checksum.
pub fn s318(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    let inc = ctx.params.stride_or(1);
    initialise(ws, "s318");
    ctx.start_timer();
    let n = ws.len_1d();
    let mut max: Real = 0.0;
    let mut index = 0;
    for _ in 0..ctx.reps {
        let mut k = 0;
        index = 0;
        max = ws.a[0].abs();
        k += inc;
        for i in 1..n {
            if ws.a[k].abs() > max {
                index = i;
                max = ws.a[k].abs();
            }
            k += inc;
        }
        let chksum = max + index as Real;
        ctx.sink(ws, chksum);
    }
    ctx.stop_timer();
    max + index as Real + 1.0
}

/// Reduction: max with two-dimensional index. Returns the reduction with
/// one-based indices rather than a checksum.
pub fn s3110(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s3110");
    ctx.start_timer();
    let n2 = ws.len_2d();
    let mut max: Real = 0.0;
    let mut xindex = 0;
    let mut yindex = 0;
    for _ in 0..ctx.reps {
        max = ws.aa[(0, 0)];
        xindex = 0;
        yindex = 0;
        for i in 0..n2 {
            for j in 0..n2 {
                if ws.aa[(i, j)] > max {
                    max = ws.aa[(i, j)];
                    xindex = i;
                    yindex = j;
                }
            }
        }
        let chksum = max + xindex as Real + yindex as Real;
        ctx.sink(ws, chksum);
    }
    ctx.stop_timer();
    max + (xindex + 1) as Real + (yindex + 1) as Real
}

/// Reduction: running sum saved into `b` each iteration. Returns the final
/// sum rather than a checksum.
pub fn s3112(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s3112");
    ctx.start_timer();
    let n = ws.len_1d();
    let mut sum: Real = 0.0;
    for _ in 0..ctx.reps {
        sum = 0.0;
        for i in 0..n {
            sum += ws.a[i];
            ws.b[i] = sum;
        }
        ctx.sink(ws, sum);
    }
    ctx.stop_timer();
    sum
}

/// Recurrence: first-order linear recurrence.
pub fn s321(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s321");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            ws.a[i] += ws.a[i - 1] * ws.b[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s321")
}

/// Recurrence: second-order linear recurrence.
pub fn s322(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s322");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 2..n {
            ws.a[i] = ws.a[i] + ws.a[i - 1] * ws.b[i] + ws.a[i - 2] * ws.c[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s322")
}

/// Recurrence: coupled recurrence across two arrays.
pub fn s323(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s323");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            ws.a[i] = ws.b[i - 1] + ws.c[i] * ws.d[i];
            ws.b[i] = ws.a[i] + ws.c[i] * ws.e[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s323")
}

/// Search: first value greater than the threshold, early exit on a hit.
/// Returns the found value (or -1) rather than a checksum.
pub fn s332(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    let t = ctx.params.threshold_or(1.0);
    initialise(ws, "s332");
    ctx.start_timer();
    let n = ws.len_1d();
    let mut value: Real = -1.0;
    for _ in 0..ctx.reps {
        let mut index: isize = -2;
        value = -1.0;
        for i in 0..n {
            if ws.a[i] > t {
                index = i as isize;
                value = ws.a[i];
                break;
            }
        }
        let chksum = value + index as Real;
        ctx.sink(ws, chksum);
    }
    ctx.stop_timer();
    value
}

/// Packing: compact positive values into a prefix; the output index is
/// data-dependent and unknowable per iteration.
pub fn s341(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s341");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut j = 0;
        for i in 0..n {
            if ws.b[i] > 0.0 {
                ws.a[j] = ws.b[i];
                j += 1;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s341")
}

/// Unpacking: scatter from a packed prefix back into the guarded positions.
pub fn s342(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s342");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut j = 0;
        for i in 0..n {
            if ws.a[i] > 0.0 {
                ws.a[i] = ws.b[j];
                j += 1;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s342")
}

/// Packing: compact a guarded 2-D selection into the flat buffer.
pub fn s343(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s343");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        let mut k = 0;
        for i in 0..n2 {
            for j in 0..n2 {
                if ws.bb[(j, i)] > 0.0 {
                    ws.flat[k] = ws.aa[(j, i)];
                    k += 1;
                }
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s343")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{run_once, test_workspace};
    use approx::assert_relative_eq;
    use loopbench_core::Params;

    #[test]
    fn test_s3112_returns_analytic_sum() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s3112, Params::None);
        // a[i] = 1/(i+1), so the reduction is the 40th harmonic number.
        let harmonic: f64 = (1..=40).map(|k| 1.0 / k as f64).sum();
        assert_relative_eq!(result as f64, harmonic, max_relative = 1e-5);
        // The running sums land in b.
        assert_eq!(ws.b[0].to_bits(), ws.a[0].to_bits());
        assert!(ws.b[39] > ws.b[38]);
    }

    #[test]
    fn test_s31111_checksums_untouched_a() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s31111, Params::None);
        // The kernel only reads; its checksum is the initialised sum of a.
        let harmonic: f64 = (1..=40).map(|k| 1.0 / k as f64).sum();
        assert_relative_eq!(result as f64, harmonic, max_relative = 1e-5);
    }

    #[test]
    fn test_s318_finds_leading_maximum() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s318, Params::Stride(1));
        // |a| is strictly decreasing, so the max sits at index 0 and the
        // one-based return contract adds 1.
        assert_relative_eq!(result, 2.0, max_relative = 1e-6);
    }

    #[test]
    fn test_s3110_one_based_indices() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s3110, Params::None);
        // aa[(0,0)] = 1.0 is the global max; return is max + 1 + 1.
        assert_relative_eq!(result, 3.0, max_relative = 1e-6);
    }

    #[test]
    fn test_s332_unreachable_threshold_scans_fully() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s332, Params::Threshold(1.0));
        // No initialised element exceeds 1.0, so the search fails.
        assert_eq!(result, -1.0);
    }

    #[test]
    fn test_s332_hit_terminates_scan() {
        let mut ws = test_workspace();
        let result = run_once(&mut ws, s332, Params::Threshold(0.75));
        // a[0] = 1.0 is the only element above 0.75.
        assert_eq!(result, 1.0);
    }

    #[test]
    fn test_s341_packs_every_positive_value() {
        let mut ws = test_workspace();
        run_once(&mut ws, s341, Params::None);
        // All b values are positive, so a becomes a copy of b.
        for i in 0..ws.len_1d() {
            assert_eq!(ws.a[i].to_bits(), ws.b[i].to_bits());
        }
    }

    #[test]
    fn test_s343_packs_entire_matrix() {
        let mut ws = test_workspace();
        run_once(&mut ws, s343, Params::None);
        let n2 = ws.len_2d();
        // Every bb element is positive, so the flat prefix is a column-major
        // copy of aa.
        assert_eq!(ws.flat[0].to_bits(), ws.aa[(0, 0)].to_bits());
        assert_eq!(ws.flat[1].to_bits(), ws.aa[(1, 0)].to_bits());
        assert_eq!(ws.flat[n2].to_bits(), ws.aa[(0, 1)].to_bits());
    }

    #[test]
    fn test_s321_first_order_recurrence_prefix() {
        let mut ws = test_workspace();
        run_once(&mut ws, s321, Params::None);
        // a[1] = init_a[1] + a[0] * b[1] with a[0] = 1, b[1] = 1/4.
        assert_relative_eq!(ws.a[1], 0.5 + 1.0 * 0.25, max_relative = 1e-6);
    }
}
