//! Catalog of data-dependence loop kernels
//!
//! Every kernel instantiates one dependence-pattern archetype over the
//! shared workspace and follows the uniform harness shape: initialise,
//! start timer, repeat the pattern body with one sink call per repetition,
//! stop timer, return the checksum (or, for a minority of reduction and
//! search kernels, the directly computed result).
//!
//! [`catalog`] lists the kernels in their fixed declaration order; the
//! harness must invoke them in exactly this order for reports to be
//! comparable across runs and across compilers.

pub mod control;
pub mod dependence;
pub mod idiom;
pub mod vectorization;

use loopbench_core::{Kernel, Params, RepScale};

use control::*;
use dependence::*;
use idiom::*;
use vectorization::*;

macro_rules! kernel {
    ($name:ident, $reps:expr) => {
        Kernel {
            name: stringify!($name),
            reps: $reps,
            params: Params::None,
            run: $name,
        }
    };
    ($name:ident, $reps:expr, $params:expr) => {
        Kernel {
            name: stringify!($name),
            reps: $reps,
            params: $params,
            run: $name,
        }
    };
}

/// The full kernel registry in declaration order.
///
/// The repetition scaling constants are chosen per kernel so total work is
/// roughly uniform despite differing body complexity: O(n) bodies repeat a
/// multiple of the iteration constant, O(n^2) bodies divide it by the
/// matrix dimension.
static CATALOG: [Kernel; 51] = [
    kernel!(s112, RepScale::Times(3)),
    kernel!(s1113, RepScale::Times(2)),
    kernel!(s114, RepScale::PerMatrix(200)),
    kernel!(s116, RepScale::Times(10)),
    kernel!(s123, RepScale::Times(1)),
    kernel!(s126, RepScale::PerMatrix(10)),
    kernel!(s131, RepScale::Times(5)),
    kernel!(s132, RepScale::Times(400)),
    kernel!(s141, RepScale::PerMatrix(200)),
    kernel!(s161, RepScale::Frac(2)),
    kernel!(s1161, RepScale::Times(1)),
    kernel!(s211, RepScale::Times(1)),
    kernel!(s212, RepScale::Times(1)),
    kernel!(s1213, RepScale::Times(1)),
    kernel!(s221, RepScale::Frac(2)),
    kernel!(s222, RepScale::Frac(2)),
    kernel!(s231, RepScale::PerMatrix(100)),
    kernel!(s232, RepScale::PerMatrix(100)),
    kernel!(s233, RepScale::PerMatrix(100)),
    kernel!(s2233, RepScale::PerMatrix(100)),
    kernel!(s235, RepScale::PerMatrix(200)),
    kernel!(s241, RepScale::Times(2)),
    kernel!(s242, RepScale::Frac(5), Params::Pair(1.0, 2.0)),
    kernel!(s244, RepScale::Times(1)),
    kernel!(s1244, RepScale::Times(1)),
    kernel!(s2251, RepScale::Times(1)),
    kernel!(s256, RepScale::PerMatrix(10)),
    kernel!(s258, RepScale::Times(1)),
    kernel!(s261, RepScale::Times(1)),
    kernel!(s275, RepScale::PerMatrix(10)),
    kernel!(s277, RepScale::Times(1)),
    kernel!(s281, RepScale::Times(1)),
    kernel!(s291, RepScale::Times(2)),
    kernel!(s292, RepScale::Times(1)),
    kernel!(s293, RepScale::Times(4)),
    kernel!(s2111, RepScale::PerMatrix(100)),
    kernel!(s31111, RepScale::Times(2000)),
    kernel!(s318, RepScale::Frac(2), Params::Stride(1)),
    kernel!(s3110, RepScale::PerMatrix(100)),
    kernel!(s3112, RepScale::Times(1)),
    kernel!(s321, RepScale::Times(1)),
    kernel!(s322, RepScale::Frac(2)),
    kernel!(s323, RepScale::Frac(2)),
    kernel!(s332, RepScale::Times(1), Params::Threshold(1.0)),
    kernel!(s341, RepScale::Times(1)),
    kernel!(s342, RepScale::Times(1)),
    kernel!(s343, RepScale::PerMatrix(10)),
    kernel!(s442, RepScale::Frac(2)),
    kernel!(s451, RepScale::Frac(5)),
    kernel!(s481, RepScale::Times(1)),
    kernel!(s482, RepScale::Times(1)),
];

/// All registered kernels in invocation order.
pub fn catalog() -> &'static [Kernel] {
    &CATALOG
}

#[cfg(test)]
pub(crate) mod test_util {
    use loopbench_core::{BenchConfig, Invocation, Params, Real, Workspace};

    /// A 40-element working set, the smallest valid configuration.
    pub fn test_workspace() -> Workspace {
        let cfg = BenchConfig::new(40, 40, 1).unwrap();
        Workspace::new(&cfg)
    }

    /// Run a kernel with exactly one outer repetition.
    pub fn run_once(
        ws: &mut Workspace,
        kernel: fn(&mut Workspace, &mut Invocation) -> Real,
        params: Params,
    ) -> Real {
        let mut ctx = Invocation::new(1, params);
        let result = kernel(ws, &mut ctx);
        assert_eq!(ctx.sink_calls(), 1);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopbench_core::{initialise, BenchConfig, Workspace};
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_uniqueness() {
        let names: Vec<&str> = catalog().iter().map(|k| k.name).collect();
        assert_eq!(names.len(), 51);
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_catalog_declaration_order_is_fixed() {
        let names: Vec<&str> = catalog().iter().map(|k| k.name).collect();
        assert_eq!(&names[..4], &["s112", "s1113", "s114", "s116"]);
        assert_eq!(names[36], "s31111");
        assert_eq!(&names[47..], &["s442", "s451", "s481", "s482"]);
    }

    #[test]
    fn test_parameterized_kernels_carry_their_blocks() {
        let by_name: Vec<&Kernel> = catalog()
            .iter()
            .filter(|k| k.params != loopbench_core::Params::None)
            .collect();
        let names: Vec<&str> = by_name.iter().map(|k| k.name).collect();
        assert_eq!(names, ["s242", "s318", "s332"]);
    }

    #[test]
    fn test_kernel_isolation_via_reinitialisation() {
        // Running an arbitrary mutating kernel and then re-initialising must
        // restore the exact workspace a fresh process would see.
        let cfg = BenchConfig::new(40, 40, 1).unwrap();
        let mut fresh = Workspace::new(&cfg);
        initialise(&mut fresh, "reference");

        let mut reused = Workspace::new(&cfg);
        crate::test_util::run_once(
            &mut reused,
            dependence::s112,
            loopbench_core::Params::None,
        );
        crate::test_util::run_once(&mut reused, idiom::s341, loopbench_core::Params::None);
        initialise(&mut reused, "after-kernels");

        assert_eq!(fresh.a.to_vec(), reused.a.to_vec());
        assert_eq!(fresh.b.to_vec(), reused.b.to_vec());
        assert_eq!(fresh.flat.to_vec(), reused.flat.to_vec());
        assert_eq!(fresh.aa.as_slice(), reused.aa.as_slice());
        assert_eq!(fresh.indx.to_vec(), reused.indx.to_vec());
    }
}
