//! Criterion benchmarks for a representative kernel subset.
//!
//! These complement the harness's own wall-clock report: criterion gives
//! statistically robust per-kernel timings on a reduced working set, which
//! is convenient when iterating on compiler flags locally.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use loopbench::{BenchConfig, Invocation, Params, Workspace};
use loopbench_kernels::{dependence, idiom, vectorization};

fn bench_config() -> BenchConfig {
    // 4000 elements keeps each criterion sample in the microsecond range.
    BenchConfig::new(4000, 40, 1).unwrap()
}

fn bench_kernels(c: &mut Criterion) {
    let cfg = bench_config();
    let mut ws = Workspace::new(&cfg);

    let mut group = c.benchmark_group("kernels");
    let cases: [(&str, fn(&mut Workspace, &mut Invocation) -> loopbench::Real, Params); 4] = [
        ("s112_reverse_recurrence", dependence::s112, Params::None),
        ("s281_index_set_split", vectorization::s281, Params::None),
        ("s3112_running_sum", idiom::s3112, Params::None),
        ("s321_first_order_recurrence", idiom::s321, Params::None),
    ];

    for (name, kernel, params) in cases {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut ctx = Invocation::new(1, params);
                black_box(kernel(&mut ws, &mut ctx))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
