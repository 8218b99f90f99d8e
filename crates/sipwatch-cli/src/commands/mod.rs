pub mod monitor;
pub mod snapshot;
pub mod stream;
pub mod topology;

use serde::Serialize;
use sipwatch_core::{DefaultGenerator, SchedulerConfig};

/// Build a telemetry generator: seeded when a seed is given, OS-seeded otherwise.
pub fn make_generator(seed: Option<u64>) -> DefaultGenerator {
    match seed {
        Some(seed) => {
            log::info!("telemetry generator seeded with {seed}");
            DefaultGenerator::seeded(seed)
        }
        None => DefaultGenerator::from_os(),
    }
}

/// Validate the refresh interval, exiting with status 2 if it is not positive.
pub fn scheduler_config(interval_ms: i64) -> SchedulerConfig {
    match SchedulerConfig::from_millis(interval_ms) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

/// Pretty-print `value` to `path` and report where it went.
pub fn write_json<T: Serialize>(value: &T, path: &str, label: &str) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize {label}: {e}");
            std::process::exit(1);
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => println!("{label} written to {path}"),
        Err(e) => {
            eprintln!("Failed to write {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Pretty-print `value` to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}
