use std::time::Duration;

use cache_access::{Blackhole, Config, HarnessConfig, Matrix, Order};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_traversal(c: &mut Criterion) {
    let harness = HarnessConfig::default();

    let mut group = c.benchmark_group("CacheAccess");
    group.sample_size(10 * harness.measurement_iterations);
    group.warm_up_time(iterations_time(harness.iteration_time, harness.warmup_iterations));
    group.measurement_time(iterations_time(
        harness.iteration_time,
        harness.measurement_iterations,
    ));

    // 256² fits in L2, 4096² (64 MiB) fits nowhere.
    for size in [256, 1024, 4096].iter() {
        let n = *size;
        let config = Config::new(n, 1234).expect("valid benchmark dimension");
        let matrix = Matrix::setup(&config).expect("matrix allocation");

        group.throughput(Throughput::Elements(config.elements() as u64));

        for order in Order::ALL {
            group.bench_with_input(BenchmarkId::new(order.name(), n), &matrix, |bench, m| {
                bench.iter(|| m.traverse(order, &mut Blackhole));
            });
        }
    }

    group.finish();
}

/// Criterion budgets by total time, not iteration count.
fn iterations_time(per_iteration: Duration, iterations: usize) -> Duration {
    per_iteration.saturating_mul(u32::try_from(iterations.max(1)).unwrap_or(u32::MAX))
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);
