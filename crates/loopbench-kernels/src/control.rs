//! Control-flow kernels: multi-way dispatch, intrinsics, and non-local
//! exits.

use loopbench_core::{checksum, initialise, Invocation, Real, Workspace};

/// Multi-way dispatch: a discriminant array selects one of four update
/// variants per index. The historical encoding was a computed goto; the
/// out-of-range discriminant falls back to the first variant, which is kept
/// as the `match` default.
pub fn s442(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s442");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            match ws.indx[i] {
                2 => ws.a[i] += ws.c[i] * ws.c[i],
                3 => ws.a[i] += ws.d[i] * ws.d[i],
                4 => ws.a[i] += ws.e[i] * ws.e[i],
                _ => ws.a[i] += ws.b[i] * ws.b[i],
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s442")
}

/// Intrinsics: vectorizable calls to sin and cos.
pub fn s451(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s451");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            ws.a[i] = ws.b[i].sin() + ws.c[i].cos();
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s451")
}

/// Non-local exit: a data condition ends the whole process with a success
/// status. This is designed behavior, never caught or converted into an
/// error; the standard initializer keeps `d` positive so a normal run
/// completes.
pub fn s481(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s481");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            if ws.d[i] < 0.0 {
                std::process::exit(0);
            }
            ws.a[i] += ws.b[i] * ws.c[i];
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s481")
}

/// Loop exit with code before the exit: the update always runs before the
/// data-dependent break.
pub fn s482(ws: &mut Workspace, ctx: &mut Invocation) -> Real {
    initialise(ws, "s482");
    ctx.start_timer();
    let n = ws.len_1d();
    for _ in 0..ctx.reps {
        for i in 0..n {
            ws.a[i] += ws.b[i] * ws.c[i];
            if ws.c[i] > ws.b[i] {
                break;
            }
        }
        ctx.sink(ws, 0.0);
    }
    ctx.stop_timer();
    checksum(ws, "s482")
}
