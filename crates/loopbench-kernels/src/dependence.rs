//! Dependence-analysis kernels: linear dependence, induction variables,
//! global data flow, non-linear subscripts, and control-flow mutual
//! exclusion.
//!
//! Each kernel follows the same shape: initialise the workspace, start the
//! timer, run the pattern body `ctx.reps` times with one sink call per
//! repetition, stop the timer, and return the checksum over the arrays the
//! body writes.

use loopbench_core::{checksum, initialise, Invocation, Real, Workspace};

/// Linear dependence testing: loop reversal.
///
/// The reverse iteration order makes every read of `a[i]` see the value
/// from before the loop, so the recurrence is safe to vectorize as written;
/// the forward order would not be.
pub fn s112(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s112");
    ctx.start_timer();
    for _ in 0..ctx.reps {
        for i in (0..ws.len_1d() - 1).rev() {
            ws.a[i + 1] = ws.a[i] + ws.b[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s112")
}

/// Linear dependence testing: every iteration reads the midpoint element,
/// a one-iteration dependency that is still vectorizable.
pub fn s1113(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s1113");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            ws.a[i] = ws.a[n / 2] + ws.b[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s1113")
}

/// Linear dependence testing: transposed access below the diagonal, a jump
/// in data access that blocks vectorization.
pub fn s114(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s114");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            for j in 0..i {
                ws.aa[(i, j)] = ws.aa[(j, i)] + ws.bb[(i, j)];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s114")
}

/// Linear dependence testing: strided five-statement chain where each
/// statement feeds the next.
pub fn s116(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s116");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut i = 0;
        while i < n - 5 {
            ws.a[i] = ws.a[i + 1] * ws.a[i];
            ws.a[i + 1] = ws.a[i + 2] * ws.a[i + 1];
            ws.a[i + 2] = ws.a[i + 3] * ws.a[i + 2];
            ws.a[i + 3] = ws.a[i + 4] * ws.a[i + 3];
            ws.a[i + 4] = ws.a[i + 5] * ws.a[i + 4];
            i += 5;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s116")
}

/// Induction variable under an if: the output index advances conditionally,
/// so the condition cannot be speculated.
pub fn s123(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s123");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        let mut j = 0;
        for i in 0..n / 2 {
            ws.a[j] = ws.b[i] + ws.d[i] * ws.e[i];
            j += 1;
            if ws.c[i] > 0.0 {
                ws.a[j] = ws.c[i] + ws.d[i] * ws.e[i];
                j += 1;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s123")
}

/// Induction variable in two loops with a recurrence in the inner one.
pub fn s126(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s126");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        let mut k = 1;
        for i in 0..n2 {
            for j in 1..n2 {
                ws.bb[(j, i)] = ws.bb[(j - 1, i)] + ws.flat[k - 1] * ws.cc[(j, i)];
                k += 1;
            }
            k += 1;
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s126")
}

/// Global data flow analysis: forward substitution of a unit offset.
pub fn s131(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s131");
    ctx.start_timer();
    let n = ws.len_1d();
    let m = 1;
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            ws.a[i] = ws.a[i + m] + ws.b[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s131")
}

/// Global data flow analysis: two-dimensional subscripts that look
/// ambiguous but address disjoint rows.
pub fn s132(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s132");
    ctx.start_timer();
    let n2 = ws.len_2d();
    let j = 0;
    let k = j + 1;
    for _ in 0..ctx.reps {
        for i in 1..n2 {
            ws.aa[(j, i)] = ws.aa[(k, i - 1)] + ws.b[i] * ws.c[1];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s132")
}

/// Non-linear dependence testing: walk a row of a symmetric packed array,
/// where element (i, j) for j > i lives at `j*(j-1)/2 + i` and the stride
/// accumulates as the walk advances.
pub fn s141(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s141");
    ctx.start_timer();
    let n2 = ws.len_2d();
    for _ in 0..ctx.reps {
        for i in 0..n2 {
            let mut k = (i + 1) * i / 2 + i;
            for j in i..n2 {
                ws.flat[k] += ws.bb[(j, i)];
                k += j + 1;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s141")
}

/// Control flow: loop-independent dependences between statements in
/// mutually exclusive regions, branch writes to `c`.
pub fn s161(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s161");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            if ws.b[i] < 0.0 {
                ws.c[i + 1] = ws.a[i] + ws.d[i] * ws.d[i];
            } else {
                ws.a[i] = ws.c[i] + ws.d[i] * ws.e[i];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s161")
}

/// Control flow: mutually exclusive regions as in [`s161`], but the
/// alternate branch writes to `b` at the same index.
pub fn s1161(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s1161");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n - 1 {
            if ws.c[i] < 0.0 {
                ws.b[i] = ws.a[i] + ws.d[i] * ws.d[i];
            } else {
                ws.a[i] = ws.c[i] + ws.d[i] * ws.e[i];
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s1161")
}
