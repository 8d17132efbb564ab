//! Logging setup for host apps.
//!
//! Level resolution: `debug` when requested by the caller or when
//! `TODO_CORE_DEBUG_LOG` is truthy, else `RUST_LOG`, else `info`.
//! Safe to call more than once; later calls are ignored.

use std::env;

use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "TODO_CORE_DEBUG_LOG";

fn debug_env_enabled() -> bool {
    env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn build_filter(debug: bool) -> EnvFilter {
    if debug || debug_env_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs a fmt subscriber for the process. Returns false if one was already set.
#[uniffi::export]
pub fn init_logging(debug: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(debug))
        .with_target(false)
        .try_init()
        .is_ok()
}
