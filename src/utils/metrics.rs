//! Metrics collection for sanitization sessions

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

pub const RUNS_STARTED: &str = "runs_started";
pub const RUNS_COMPLETED: &str = "runs_completed";
pub const RUNS_FAILED: &str = "runs_failed";
pub const EXPORTS_COMPLETED: &str = "exports_completed";
pub const PRINT_FALLBACKS: &str = "print_fallbacks";
pub const RUN_TIMER: &str = "run";

/// Counters and timers for session operations
#[derive(Debug, Clone)]
pub struct Metrics {
    counters: Arc<RwLock<HashMap<String, u64>>>,
    timers: Arc<RwLock<HashMap<String, Duration>>>,
    start_times: Arc<RwLock<HashMap<String, Instant>>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            timers: Arc::new(RwLock::new(HashMap::new())),
            start_times: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.write();
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn start_timer(&self, name: &str) {
        self.start_times.write().insert(name.to_string(), Instant::now());
    }

    pub fn end_timer(&self, name: &str) -> Option<Duration> {
        let start_time = self.start_times.write().remove(name)?;
        let duration = start_time.elapsed();
        self.timers.write().insert(name.to_string(), duration);
        Some(duration)
    }

    pub fn get_counter(&self, name: &str) -> u64 {
        self.counters.read().get(name).copied().unwrap_or(0)
    }

    pub fn get_timer(&self, name: &str) -> Option<Duration> {
        self.timers.read().get(name).copied()
    }

    pub fn reset(&self) {
        self.counters.write().clear();
        self.timers.write().clear();
        self.start_times.write().clear();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.read().clone(),
            timers: self.timers.read().clone(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub counters: HashMap<String, u64>,
    pub timers: HashMap<String, Duration>,
}
