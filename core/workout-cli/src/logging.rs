//! Log output for the CLI. Everything goes to stderr so stdout stays clean
//! for listings and CSV.

use std::env;
use tracing_subscriber::EnvFilter;

/// Forces debug-level output when set to a truthy value.
const DEBUG_ENV: &str = "WORKOUT_DEBUG_LOG";

pub fn init() {
    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
