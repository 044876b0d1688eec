//! Checksum reduction over the workspace
//!
//! The checksum is the correctness oracle of the whole harness: two builds
//! of the same kernel under different optimization levels must agree on it
//! (up to floating-point reassociation). It is a pure function of the
//! workspace contents; the kernel name only selects which arrays that kernel
//! writes and therefore which arrays are semantically relevant.

use bitflags::bitflags;

use crate::workspace::Workspace;
use crate::Real;

bitflags! {
    /// The subset of workspace arrays a kernel's checksum folds over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ArraySet: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const C = 1 << 2;
        const D = 1 << 3;
        const E = 1 << 4;
        const AA = 1 << 5;
        const BB = 1 << 6;
        const CC = 1 << 7;
        const FLAT = 1 << 8;
    }
}

/// Map a kernel name to the arrays it writes.
///
/// Kernels that return a directly-computed reduction value never reach the
/// reducer and are intentionally absent. An unknown name conservatively
/// folds every array, so a misregistered kernel still surfaces a comparable
/// scalar instead of silently checksumming nothing.
pub fn relevant_arrays(name: &str) -> ArraySet {
    match name {
        "s112" | "s1113" | "s116" | "s123" | "s131" | "s242" | "s291" | "s292" | "s293"
        | "s321" | "s322" | "s31111" | "s341" | "s342" | "s442" | "s451" | "s481" | "s482" => {
            ArraySet::A
        }
        "s114" | "s132" | "s231" | "s232" | "s2111" | "s275" => ArraySet::AA,
        "s126" => ArraySet::BB,
        "s141" | "s343" => ArraySet::FLAT,
        "s161" | "s261" => ArraySet::A.union(ArraySet::C),
        "s1161" | "s211" | "s212" | "s1213" | "s221" | "s241" | "s244" | "s2251" | "s277"
        | "s281" | "s323" => ArraySet::A.union(ArraySet::B),
        "s222" => ArraySet::A.union(ArraySet::E),
        "s233" | "s2233" => ArraySet::AA.union(ArraySet::BB),
        "s235" | "s256" => ArraySet::A.union(ArraySet::AA),
        "s258" => ArraySet::B.union(ArraySet::E),
        "s1244" => ArraySet::A.union(ArraySet::D),
        other => {
            log::debug!("no checksum subset registered for {other}, folding all arrays");
            ArraySet::all()
        }
    }
}

#[inline]
fn sum(values: &[Real]) -> Real {
    values.iter().copied().sum()
}

/// Fold the named kernel's relevant arrays into a single scalar.
pub fn checksum(ws: &Workspace, name: &str) -> Real {
    let set = relevant_arrays(name);
    let mut total: Real = 0.0;
    if set.contains(ArraySet::A) {
        total += sum(&ws.a);
    }
    if set.contains(ArraySet::B) {
        total += sum(&ws.b);
    }
    if set.contains(ArraySet::C) {
        total += sum(&ws.c);
    }
    if set.contains(ArraySet::D) {
        total += sum(&ws.d);
    }
    if set.contains(ArraySet::E) {
        total += sum(&ws.e);
    }
    if set.contains(ArraySet::AA) {
        total += sum(ws.aa.as_slice());
    }
    if set.contains(ArraySet::BB) {
        total += sum(ws.bb.as_slice());
    }
    if set.contains(ArraySet::CC) {
        total += sum(ws.cc.as_slice());
    }
    if set.contains(ArraySet::FLAT) {
        total += sum(&ws.flat);
    }
    total
}
