//! Telemetry pipeline: run status, the event log and progress, published as events

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::Result;
use crate::types::RunStatus;
use crate::utils::Clock;

pub mod log;
pub mod progress;

pub use self::{
    log::{Emphasis, LogEntry, Severity, SeverityStyle, TelemetryLog},
    progress::{percent_for, ProgressState, ProgressTracker, DEFAULT_SECTOR_LABEL},
};

/// One observable state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    StatusChanged(RunStatus),
    LogAppended(LogEntry),
    LogCleared,
    ProgressChanged(ProgressState),
    CertificateIssued(String),
    CertificateDiscarded,
}

/// Run status, log and progress with immediate event publication
pub struct Telemetry {
    status: RunStatus,
    log: TelemetryLog,
    progress: ProgressTracker,
    subscribers: Vec<UnboundedSender<TelemetryEvent>>,
}

impl Telemetry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            status: RunStatus::Idle,
            log: TelemetryLog::new(clock),
            progress: ProgressTracker::new(),
            subscribers: Vec::new(),
        }
    }

    /// Receives every subsequent transition in emission order
    pub fn subscribe(&mut self) -> UnboundedReceiver<TelemetryEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn log(&self) -> &TelemetryLog {
        &self.log
    }

    pub fn progress(&self) -> &ProgressState {
        self.progress.state()
    }

    pub fn set_status(&mut self, status: RunStatus) {
        if self.status != status {
            self.status = status;
            self.publish(TelemetryEvent::StatusChanged(status));
        }
    }

    pub fn record(&mut self, severity: Severity, message: impl Into<String>) {
        let entry = self.log.append(message, severity);
        self.publish(TelemetryEvent::LogAppended(entry));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.record(Severity::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.record(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(Severity::Error, message);
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.publish(TelemetryEvent::LogCleared);
    }

    pub fn reset_progress(&mut self) {
        self.progress.reset();
        self.publish_progress();
    }

    pub fn set_sector(&mut self, label: impl Into<String>) -> Result<()> {
        self.progress.set_sector_label(label)?;
        self.publish_progress();
        Ok(())
    }

    pub fn advance(&mut self, completed: u32, total: u32) {
        self.progress.advance(completed, total);
        self.publish_progress();
    }

    pub fn complete(&mut self) {
        self.progress.complete();
        self.publish_progress();
    }

    pub(crate) fn publish(&mut self, event: TelemetryEvent) {
        // Dropped receivers are pruned on the next send.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn publish_progress(&mut self) {
        let state = self.progress.state().clone();
        self.publish(TelemetryEvent::ProgressChanged(state));
    }
}
