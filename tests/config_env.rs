//! Environment overrides. Kept in their own test binary, as a single test,
//! because they mutate process-wide state.

use std::env;
use std::time::Duration;

use cache_access::config::{ENV_DIM, ENV_SEED, MAX_DIM};
use cache_access::harness::{ENV_FORKS, ENV_ITERATION_MS, ENV_ITERATIONS, ENV_WARMUP};
use cache_access::{Config, Error, HarnessConfig};

fn set(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

fn clear(key: &str) {
    unsafe { env::remove_var(key) };
}

#[test]
fn test_env_overrides() {
    for key in [ENV_DIM, ENV_SEED, ENV_WARMUP, ENV_ITERATIONS, ENV_FORKS, ENV_ITERATION_MS] {
        clear(key);
    }

    // Unset: defaults.
    assert_eq!(Config::from_env().unwrap(), Config::default());
    assert_eq!(HarnessConfig::from_env().unwrap(), HarnessConfig::default());

    // Valid overrides.
    set(ENV_DIM, "128");
    set(ENV_SEED, " 42 ");
    let config = Config::from_env().unwrap();
    assert_eq!(config.dim(), 128);
    assert_eq!(config.seed(), 42);

    set(ENV_WARMUP, "0");
    set(ENV_ITERATIONS, "3");
    set(ENV_FORKS, "2");
    set(ENV_ITERATION_MS, "250");
    let harness = HarnessConfig::from_env().unwrap();
    assert_eq!(harness.iteration_time, Duration::from_millis(250));
    assert_eq!(harness.warmup_iterations, 0);
    assert_eq!(harness.measurement_iterations, 3);
    assert_eq!(harness.fork_count, 2);

    // Garbage fails fast.
    set(ENV_DIM, "big");
    match Config::from_env() {
        Err(Error::InvalidConfig { key, value }) => {
            assert_eq!(key, ENV_DIM);
            assert_eq!(value, "big");
        }
        other => panic!("expected InvalidConfig, got {:?}", other),
    }

    // Out of range fails fast.
    set(ENV_DIM, &(MAX_DIM + 1).to_string());
    assert!(matches!(Config::from_env(), Err(Error::InvalidDimension { .. })));

    set(ENV_FORKS, "0");
    assert!(matches!(HarnessConfig::from_env(), Err(Error::InvalidHarness(_))));

    for key in [ENV_DIM, ENV_SEED, ENV_WARMUP, ENV_ITERATIONS, ENV_FORKS, ENV_ITERATION_MS] {
        clear(key);
    }
}
