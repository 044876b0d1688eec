//! Deterministic workspace initialization
//!
//! Every element is overwritten from a fixed formula of its index alone, so
//! two consecutive invocations are bit-identical regardless of what kernels
//! ran in between. This is the basis for checksum comparability across runs
//! and across compilers.
//!
//! All generated values are strictly positive. The non-local-exit kernel
//! guards on a negative element, so a normally-initialized run always
//! completes.

use crate::workspace::Workspace;
use crate::Real;

#[inline]
fn recip(k: usize) -> Real {
    1.0 / (k + 1) as Real
}

#[inline]
fn recip_sq(k: usize) -> Real {
    let v = (k + 1) as Real;
    1.0 / (v * v)
}

#[inline]
fn recip_cube(k: usize) -> Real {
    let v = (k + 1) as Real;
    1.0 / (v * v * v)
}

/// Repopulate the whole workspace from the fixed index formulas.
///
/// `name` identifies the kernel about to run and is used for trace logging
/// only; the generated contents never depend on it.
pub fn initialise(ws: &mut Workspace, name: &str) {
    log::trace!("initialising workspace for {name}");

    ws.a.fill_with(recip);
    ws.b.fill_with(recip_sq);
    ws.c.fill_with(recip_cube);
    ws.d.fill_with(recip);
    ws.e.fill_with(recip_sq);

    ws.aa.fill_with(recip);
    ws.bb.fill_with(recip_sq);
    ws.cc.fill_with(recip_cube);
    ws.flat.fill_with(recip);

    // Discriminants cycle through the four dispatch variants.
    ws.indx.fill_with(|i| (i % 4) as i32 + 1);
}
