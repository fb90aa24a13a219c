//! A minimal timing harness.
//!
//! Run parameters are an explicit [`HarnessConfig`] handed to [`run`]:
//! warmup and measurement iteration counts, how long each iteration lasts,
//! how many forks to repeat the whole thing in, and the unit results are
//! reported in. An iteration invokes the operation back to back until
//! `iteration_time` has passed (at least once), and yields one sample: the
//! average time per operation over all of its invocations.
//!
//! Forks are in-process: every fork rebuilds its state with `setup` before
//! warming up, so each one measures a fresh allocation.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::env_or;
use crate::error::{Error, Result};

pub const ENV_WARMUP: &str = "CACHE_ACCESS_WARMUP";
pub const ENV_ITERATIONS: &str = "CACHE_ACCESS_ITERATIONS";
pub const ENV_FORKS: &str = "CACHE_ACCESS_FORKS";
pub const ENV_ITERATION_MS: &str = "CACHE_ACCESS_ITERATION_MS";

/// Unit measurements are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Express `elapsed / ops` in this unit.
    ///
    /// ```
    /// use std::time::Duration;
    /// use cache_access::harness::TimeUnit;
    ///
    /// let per_op = TimeUnit::Nanoseconds.per_op(Duration::from_micros(8), 4);
    /// assert_eq!(per_op, 2000.0);
    /// ```
    pub fn per_op(&self, elapsed: Duration, ops: usize) -> f64 {
        let ops = ops.max(1) as f64;
        let secs = elapsed.as_secs_f64() / ops;
        match self {
            TimeUnit::Nanoseconds => secs * 1e9,
            TimeUnit::Microseconds => secs * 1e6,
            TimeUnit::Milliseconds => secs * 1e3,
            TimeUnit::Seconds => secs,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub warmup_iterations: usize,
    pub measurement_iterations: usize,
    pub fork_count: usize,
    /// Minimum wall time of one iteration. `Duration::ZERO` means a single
    /// invocation per iteration.
    pub iteration_time: Duration,
    pub time_unit: TimeUnit,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 5,
            measurement_iterations: 5,
            fork_count: 5,
            iteration_time: Duration::from_secs(1),
            time_unit: TimeUnit::Nanoseconds,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `CACHE_ACCESS_WARMUP`, `CACHE_ACCESS_ITERATIONS`,
    /// `CACHE_ACCESS_FORKS` and `CACHE_ACCESS_ITERATION_MS`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            warmup_iterations: env_or(ENV_WARMUP, defaults.warmup_iterations)?,
            measurement_iterations: env_or(ENV_ITERATIONS, defaults.measurement_iterations)?,
            fork_count: env_or(ENV_FORKS, defaults.fork_count)?,
            iteration_time: Duration::from_millis(env_or(
                ENV_ITERATION_MS,
                defaults.iteration_time.as_millis() as u64,
            )?),
            time_unit: defaults.time_unit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Zero warmup is fine; zero measurements or forks would produce nothing.
    pub fn validate(&self) -> Result<()> {
        if self.measurement_iterations == 0 {
            return Err(Error::InvalidHarness(
                "measurement_iterations must be at least 1".into(),
            ));
        }
        if self.fork_count == 0 {
            return Err(Error::InvalidHarness("fork_count must be at least 1".into()));
        }
        Ok(())
    }
}

/// Per-operation timings collected by [`run`].
#[derive(Debug, Clone)]
pub struct Measurement {
    pub name: String,
    pub time_unit: TimeUnit,
    /// One entry per measured invocation, across all forks.
    pub samples: Vec<f64>,
}

impl Measurement {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Time `op` under `config`.
///
/// `setup` runs once per fork and its result is handed to every invocation
/// of `op` in that fork. Warmup iterations are discarded. Each measured
/// iteration is recorded as its elapsed time divided by the number of
/// operations it ran (`ops_per_invocation` per invocation).
///
/// # Errors
///
/// Fails if `config` is invalid or if `setup` fails. Nothing is measured in
/// either case.
///
/// ```
/// use std::time::Duration;
/// use cache_access::harness::{self, HarnessConfig};
///
/// let config = HarnessConfig {
///     warmup_iterations: 1,
///     measurement_iterations: 2,
///     fork_count: 3,
///     iteration_time: Duration::ZERO,
///     ..Default::default()
/// };
/// let m = harness::run(&config, "sum", 100, || Ok((0..100).collect::<Vec<u64>>()), |v| {
///     std::hint::black_box(v.iter().sum::<u64>());
/// }).unwrap();
/// assert_eq!(m.len(), 6);
/// ```
pub fn run<T, S, F>(
    config: &HarnessConfig,
    name: &str,
    ops_per_invocation: usize,
    mut setup: S,
    mut op: F,
) -> Result<Measurement>
where
    S: FnMut() -> Result<T>,
    F: FnMut(&T),
{
    config.validate()?;

    let mut samples = Vec::with_capacity(config.fork_count * config.measurement_iterations);

    for fork in 1..=config.fork_count {
        info!(benchmark = name, fork, forks = config.fork_count, "starting fork");
        let state = setup()?;

        for i in 1..=config.warmup_iterations {
            let (elapsed, invocations) = iteration(&mut op, &state, config.iteration_time);
            debug!(
                benchmark = name,
                fork,
                iteration = i,
                invocations,
                per_op = config
                    .time_unit
                    .per_op(elapsed, ops_per_invocation.saturating_mul(invocations)),
                unit = %config.time_unit,
                "warmup"
            );
        }

        for i in 1..=config.measurement_iterations {
            let (elapsed, invocations) = iteration(&mut op, &state, config.iteration_time);
            let per_op = config
                .time_unit
                .per_op(elapsed, ops_per_invocation.saturating_mul(invocations));
            debug!(
                benchmark = name,
                fork,
                iteration = i,
                invocations,
                per_op,
                unit = %config.time_unit,
                "measurement"
            );
            samples.push(per_op);
        }
    }

    Ok(Measurement {
        name: name.to_string(),
        time_unit: config.time_unit,
        samples,
    })
}

/// Invoke `op` until `min_time` has elapsed, at least once.
/// Returns total elapsed time and the invocation count.
fn iteration<T, F: FnMut(&T)>(op: &mut F, state: &T, min_time: Duration) -> (Duration, usize) {
    let start = Instant::now();
    let mut invocations = 0;
    loop {
        op(state);
        invocations += 1;
        let elapsed = start.elapsed();
        if elapsed >= min_time {
            return (elapsed, invocations);
        }
    }
}
