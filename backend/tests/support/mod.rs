//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use transit_lab::models::TransitParameters;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily set (`Some`) or removed
/// (`None`), restoring the previous values afterwards, even on panic.
///
/// Holds a process-wide lock so tests touching the environment never
/// interleave.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut previous: Vec<(String, Option<String>)> = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            if !previous.iter().any(|(k, _)| k == key) {
                previous.push((key.to_string(), std::env::var(key).ok()));
            }
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// 3.5 d period, 2.5 h duration, 500 ppm, b = 0.3, 1000 points.
pub fn reference_transit() -> TransitParameters {
    TransitParameters::new(
        qtty::Days::new(3.5),
        qtty::Hours::new(2.5),
        500.0,
        0.3,
    )
}
