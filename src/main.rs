//! Benchmark runner for the two traversal orders.

use std::process::ExitCode;

use cache_access::{Blackhole, Config, HarnessConfig, Matrix, Measurement, Order, harness, logging};
use tracing::error;

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> cache_access::Result<()> {
    let config = Config::from_env()?;
    let harness_config = HarnessConfig::from_env()?;

    println!("=== Cache Access Benchmark ===\n");
    println!(
        "Matrix: {}×{} i32 ({} MiB), seed {}",
        config.dim(),
        config.dim(),
        config.bytes() / (1024 * 1024),
        config.seed()
    );
    println!(
        "Harness: {} warmup, {} measurement, {:?} each, {} forks\n",
        harness_config.warmup_iterations,
        harness_config.measurement_iterations,
        harness_config.iteration_time,
        harness_config.fork_count
    );

    let mut results = Vec::new();
    for order in Order::ALL {
        let measurement = harness::run(
            &harness_config,
            order.name(),
            config.elements(),
            || Matrix::setup(&config),
            |matrix: &Matrix| matrix.traverse(order, &mut Blackhole),
        )?;
        results.push(measurement);
    }

    print_summary_table(&results);
    Ok(())
}

fn print_summary_table(results: &[Measurement]) {
    println!("\n{}", "=".repeat(64));
    println!(
        "{:<12} {:>6} {:>12} {:>12} {:>12}",
        "Benchmark", "Cnt", "Mean", "Min", "Max"
    );
    println!("{}", "-".repeat(64));

    for m in results {
        let unit = m.time_unit.suffix();
        println!(
            "{:<12} {:>6} {:>9.3} {:<2} {:>9.3} {:<2} {:>9.3} {:<2}",
            m.name,
            m.len(),
            m.mean(),
            unit,
            m.min(),
            unit,
            m.max(),
            unit
        );
    }
    println!("{}", "=".repeat(64));

    if let [row, col] = results {
        if row.mean() > 0.0 {
            println!(
                "\n{} is {:.1}× slower than {} per element.",
                col.name,
                col.mean() / row.mean(),
                row.name
            );
        }
    }
    println!("Times are per element (one element = one op).\n");
}
