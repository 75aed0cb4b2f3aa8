//! Logger set-up for the SecureWiper binary and embedding applications

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber once
pub struct Logger {
    level: String,
    initialized: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            level: "info".to_string(),
            initialized: false,
        }
    }

    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            initialized: false,
        }
    }

    /// Filter directive scoped to this crate, e.g. `securewiper=debug`
    pub fn directive(&self) -> String {
        format!("securewiper={}", self.level)
    }

    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive()));

        // A subscriber installed by the host application wins.
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();

        self.initialized = true;
        if installed {
            info!("Logger initialized with level: {}", self.level);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
