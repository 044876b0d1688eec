//! Vectorization-transform kernels: statement reordering, loop
//! distribution and interchange, node splitting, scalar and array
//! expansion, index-set splitting, loop peeling, and wavefronts.

use loopbench_core::{checksum, initialise, Invocation, Real, Workspace};

/// Statement reordering: swapping the two statements removes the
/// read-after-write hazard on `b`.
pub fn s211(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s211");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n - 1 {
            ws.a[i] = ws.b[i - 1] + ws.c[i] * ws.d[i];
            ws.b[i] = ws.b[i + 1] - ws.e[i] * ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s211")
}

/// Statement reordering: dependency on `a[i+1]` needing a temporary.
pub fn s212(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s212");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            ws.a[i] *= ws.c[i];
            ws.b[i] += ws.a[i + 1] * ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s212")
}

/// Statement reordering: both a backward read of `b` and a forward read of
/// `a`, resolvable with a temporary.
pub fn s1213(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s1213");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n - 1 {
            ws.a[i] = ws.b[i - 1] + ws.c[i];
            ws.b[i] = ws.a[i + 1] * ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s1213")
}

/// Loop distribution: partially recursive loop; the `a` update is parallel,
/// the `b` update carries a first-order recurrence.
pub fn s221(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s221");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            ws.a[i] += ws.c[i] * ws.d[i];
            ws.b[i] = ws.b[i - 1] + ws.a[i] + ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s221")
}

/// Loop distribution: recurrence sandwiched between two updates that
/// cancel, leaving only `e` live.
pub fn s222(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s222");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            ws.a[i] += ws.b[i] * ws.c[i];
            ws.e[i] = ws.e[i - 1] * ws.e[i - 1];
            ws.a[i] -= ws.b[i] * ws.c[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s222")
}

/// Loop interchange: recurrence along the row axis, independent along the
/// column axis.
pub fn s231(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s231");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            for j in 1..n2 {
                ws.aa[(j, i)] = ws.aa[(j - 1, i)] + ws.bb[(j, i)];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s231")
}

/// Loop interchange: triangular iteration space with a recurrence along
/// the inner axis.
pub fn s232(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s232");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for j in 1..n2 {
            for i in 1..=j {
                ws.aa[(j, i)] = ws.aa[(j, i - 1)] * ws.aa[(j, i - 1)] + ws.bb[(j, i)];
            }
        }
        ctx.sink(ws, 1.0);
    }
    ctx.stop_timer();
    checksum(ws, "s232")
}

/// Loop interchange: two inner loops, only one of which profits from
/// interchanging.
pub fn s233(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s233");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 1..n2 {
            for j in 1..n2 {
                ws.aa[(j, i)] = ws.aa[(j - 1, i)] + ws.cc[(j, i)];
            }
            for j in 1..n2 {
                ws.bb[(j, i)] = ws.bb[(j, i - 1)] + ws.cc[(j, i)];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s233")
}

/// Loop interchange: variant of [`s233`] with the second inner loop walking
/// rows instead of columns.
pub fn s2233(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s2233");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 1..n2 {
            for j in 1..n2 {
                ws.aa[(j, i)] = ws.aa[(j - 1, i)] + ws.cc[(j, i)];
            }
            for j in 1..n2 {
                ws.bb[(i, j)] = ws.bb[(i - 1, j)] + ws.cc[(i, j)];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s2233")
}

/// Loop interchange: imperfectly nested loops, the outer body feeding the
/// inner recurrence.
pub fn s235(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s235");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            ws.a[i] += ws.b[i] * ws.c[i];
            for j in 1..n2 {
                ws.aa[(j, i)] = ws.aa[(j - 1, i)] + ws.bb[(j, i)] * ws.a[i];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s235")
}

/// Node splitting: preloading `a[i+1]` breaks the apparent cycle between
/// the two statements.
pub fn s241(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s241");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            ws.a[i] = ws.b[i] * ws.c[i] * ws.d[i];
            ws.b[i] = ws.a[i] * ws.a[i + 1] * ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s241")
}

/// Node splitting: first-order recurrence with two extra scalar addends
/// from the parameter block.
pub fn s242(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    let (s1, s2) = ctx.params.pair_or((1.0, 2.0));
    initialise(ws, "s242");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            ws.a[i] = ws.a[i - 1] + s1 + s2 + ws.b[i] + ws.c[i] + ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s242")
}

/// Node splitting: false dependence cycle broken by recognizing the two
/// live ranges of `b`.
pub fn s244(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s244");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            ws.a[i] = ws.b[i] + ws.c[i] * ws.d[i];
            ws.b[i] = ws.c[i] + ws.b[i];
            ws.a[i + 1] = ws.b[i] + ws.a[i + 1] * ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s244")
}

/// Node splitting: cycle with both a true and an anti dependency on `a`.
pub fn s1244(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s1244");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            ws.a[i] = ws.b[i] + ws.c[i] * ws.c[i] + ws.b[i] * ws.b[i] + ws.c[i];
            ws.d[i] = ws.a[i] + ws.a[i + 1];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s1244")
}

/// Scalar expansion: a scalar written each iteration and consumed the next
/// must be materialized per iteration to parallelize.
pub fn s2251(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s2251");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut s: Real = 0.0;
        for i in 0..n {
            ws.a[i] = s * ws.e[i];
            s = ws.b[i] + ws.c[i];
            ws.b[i] = ws.a[i] + ws.d[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s2251")
}

/// Array expansion: the 1-D recurrence on `a` blocks the otherwise parallel
/// column dimension.
pub fn s256(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s256");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            for j in 1..n2 {
                ws.a[j] = 1.0 - ws.a[j - 1];
                ws.aa[(j, i)] = ws.a[j] + ws.bb[(j, i)] * ws.d[j];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s256")
}

/// Scalar expansion: wrap-around scalar updated under an if and consumed by
/// every iteration.
pub fn s258(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s258");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        let mut s: Real = 0.0;
        for i in 0..n2 {
            if ws.a[i] > 0.0 {
                s = ws.d[i] * ws.d[i];
            }
            ws.b[i] = s * ws.c[i] + ws.d[i];
            ws.e[i] = (s + 1.0) * ws.aa[(0, i)];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s258")
}

/// Scalar renaming: the temporary has two distinct live ranges per
/// iteration.
pub fn s261(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s261");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 1..n {
            let mut t = ws.a[i] + ws.b[i];
            ws.a[i] = t + ws.c[i - 1];
            t = ws.c[i] * ws.d[i];
            ws.c[i] = t;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s261")
}

/// Control flow: if around the inner loop; interchanging is needed to
/// vectorize the guarded recurrence.
pub fn s275(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s275");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            if ws.aa[(0, i)] > 0.0 {
                for j in 1..n2 {
                    ws.aa[(j, i)] = ws.aa[(j - 1, i)] + ws.bb[(j, i)] * ws.cc[(j, i)];
                }
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s275")
}

/// Control flow: dependences arising from a guard variable; the `b` store
/// runs whenever `a[i]` is negative, the `a` update only when `b[i]` is
/// negative too.
pub fn s277(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s277");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            if ws.a[i] < 0.0 {
                if ws.b[i] < 0.0 {
                    ws.a[i] += ws.c[i] * ws.d[i];
                }
                ws.b[i + 1] = ws.c[i] + ws.d[i] * ws.e[i];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s277")
}

/// Index-set splitting: a reverse-indexed read combined with forward
/// writes; semantics change at the crossing threshold.
pub fn s281(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s281");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            let x = ws.a[n - i - 1] + ws.b[i] * ws.c[i];
            ws.a[i] = x - 1.0;
            ws.b[i] = x;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s281")
}

/// Loop peeling: wrap-around predecessor index, one level.
pub fn s291(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s291");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut im1 = n - 1;
        for i in 0..n {
            ws.a[i] = (ws.b[i] + ws.b[im1]) * 0.5;
            im1 = i;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s291")
}

/// Loop peeling: wrap-around predecessor indices, two levels.
pub fn s292(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s292");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut im1 = n - 1;
        let mut im2 = n - 2;
        for i in 0..n {
            ws.a[i] = (ws.b[i] + ws.b[im1] + ws.b[im2]) * 0.333;
            im2 = im1;
            im1 = i;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s292")
}

/// Loop peeling: `a[i] = a[0]` is a real dependence cycle yet vectorizable
/// after peeling the first iteration.
pub fn s293(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s293");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            ws.a[i] = ws.a[0];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s293")
}

/// Wavefront: each element depends on its north and west neighbors, forcing
/// diagonal traversal for parallelism.
pub fn s2111(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s2111");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for j in 1..n2 {
            for i in 1..n2 {
                ws.aa[(j, i)] = (ws.aa[(j, i - 1)] + ws.aa[(j - 1, i)]) / 1.9;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s2111")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{run_once, test_workspace};
    use approx::assert_relative_eq;
    use loopbench_core::Params;

    #[test]
    fn test_s222_cancelling_updates_leave_a_unchanged() {
        let mut ws = test_workspace();
        run_once(&mut ws, s222, Params::None);
        // The add and subtract of b*c cancel exactly in every iteration.
        for (i, &v) in ws.a.iter().enumerate() {
            let k = (i + 1) as Real;
            assert_eq!(v.to_bits(), (1.0 / k).to_bits());
        }
    }

    #[test]
    fn test_s242_uses_parameter_block() {
        let mut ws = test_workspace();
        run_once(&mut ws, s242, Params::Pair(1.0, 2.0));
        let with_default = ws.a[1];

        run_once(&mut ws, s242, Params::Pair(10.0, 20.0));
        // Larger addends must strictly grow the recurrence.
        assert!(ws.a[1] > with_default);
        assert_relative_eq!(ws.a[1] - with_default, 27.0, max_relative = 1e-5);
    }

    #[test]
    fn test_s293_broadcasts_first_element() {
        let mut ws = test_workspace();
        run_once(&mut ws, s293, Params::None);
        assert!(ws.a.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_s291_wraparound_first_iteration() {
        let mut ws = test_workspace();
        run_once(&mut ws, s291, Params::None);
        let n = ws.len_1d();
        // First output pairs b[0] with the wrapped-around b[n-1].
        let expected = (ws.b[0] + ws.b[n - 1]) * 0.5;
        assert_eq!(ws.a[0].to_bits(), expected.to_bits());
    }

    #[test]
    fn test_s281_reverse_read_forward_write() {
        let mut ws = test_workspace();
        run_once(&mut ws, s281, Params::None);
        // b[i] holds x and a[i] holds x - 1 for every iteration.
        for i in 0..ws.len_1d() {
            assert_eq!(ws.a[i].to_bits(), (ws.b[i] - 1.0).to_bits());
        }
    }

    #[test]
    fn test_s2111_wavefront_shrinks_interior() {
        let mut ws = test_workspace();
        run_once(&mut ws, s2111, Params::None);
        let n2 = ws.len_2d();
        // Interior elements are averages of small positive neighbors scaled
        // by 1/1.9, so they stay positive and below the row seed.
        for j in 1..n2 {
            for i in 1..n2 {
                assert!(ws.aa[(j, i)] > 0.0);
                assert!(ws.aa[(j, i)] < 1.0);
            }
        }
    }
}
