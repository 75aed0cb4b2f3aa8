//! Progress reporting for simulated sanitization runs

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sector label shown before any sub-step has run
pub const DEFAULT_SECTOR_LABEL: &str = "0x000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub percent_complete: u8,
    pub current_sector_label: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            percent_complete: 0,
            current_sector_label: DEFAULT_SECTOR_LABEL.to_string(),
        }
    }
}

/// `floor(completed / total * 100)` clamped to `0..=100`
pub fn percent_for(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = u64::from(completed) * 100 / u64::from(total);
    percent.min(100) as u8
}

#[derive(Debug, Default)]
pub struct ProgressTracker {
    state: ProgressState,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = ProgressState::default();
    }

    pub fn advance(&mut self, completed: u32, total: u32) -> u8 {
        self.state.percent_complete = percent_for(completed, total);
        self.state.percent_complete
    }

    pub fn set_sector_label(&mut self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::ValidationError("Sector label must not be empty".into()));
        }
        self.state.current_sector_label = label;
        Ok(())
    }

    pub fn complete(&mut self) {
        self.state.percent_complete = 100;
    }

    pub fn percent(&self) -> u8 {
        self.state.percent_complete
    }

    pub fn sector_label(&self) -> &str {
        &self.state.current_sector_label
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }
}
