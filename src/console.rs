//! Terminal presentation of telemetry and certificates

use tokio::sync::mpsc::UnboundedReceiver;

use crate::certificate::{CertificateFormatter, CertificateView, PrintFallback};
use crate::error::ExportError;
use crate::telemetry::{Emphasis, LogEntry, ProgressState, TelemetryEvent};
use crate::types::RunStatus;

const BAR_WIDTH: usize = 30;

/// Turns telemetry events into console lines
#[derive(Debug)]
pub struct ConsoleRenderer {
    color: bool,
    show_sectors: bool,
    last_percent: Option<u8>,
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            show_sectors: false,
            last_percent: None,
        }
    }

    /// Also print every sector label change, not just percentage changes
    pub fn with_sectors(mut self, show: bool) -> Self {
        self.show_sectors = show;
        self
    }

    pub fn render_entry(&self, entry: &LogEntry) -> String {
        let style = entry.severity.style();
        let text = entry.severity.decorate(&entry.message);
        if !self.color {
            return format!("[{}] {}", entry.timestamp, text);
        }
        let weight = match style.emphasis {
            Emphasis::Regular => "0",
            Emphasis::Bold | Emphasis::Heavy => "1",
        };
        format!(
            "\x1b[2m[{}]\x1b[0m \x1b[{};{}m{}\x1b[0m",
            entry.timestamp, weight, style.ansi_color, text
        )
    }

    pub fn render_progress(&self, state: &ProgressState) -> String {
        let filled = usize::from(state.percent_complete) * BAR_WIDTH / 100;
        format!(
            "[{}{}] {:>3}% | SECTOR {}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            state.percent_complete,
            state.current_sector_label
        )
    }

    pub fn render_status(&self, status: RunStatus) -> String {
        format!("STATUS: {}", status)
    }

    pub fn render_event(&mut self, event: &TelemetryEvent) -> Option<String> {
        match event {
            TelemetryEvent::LogAppended(entry) => Some(self.render_entry(entry)),
            TelemetryEvent::ProgressChanged(state) => {
                let changed = self.last_percent != Some(state.percent_complete);
                self.last_percent = Some(state.percent_complete);
                (changed || self.show_sectors).then(|| self.render_progress(state))
            }
            TelemetryEvent::StatusChanged(status) => Some(self.render_status(*status)),
            TelemetryEvent::LogCleared => {
                self.last_percent = None;
                None
            }
            TelemetryEvent::CertificateIssued(_) | TelemetryEvent::CertificateDiscarded => None,
        }
    }

    pub fn emit(&mut self, event: &TelemetryEvent) {
        if let Some(line) = self.render_event(event) {
            println!("{}", line);
        }
    }

    /// Emits every event already queued on `events`
    pub fn drain(&mut self, events: &mut UnboundedReceiver<TelemetryEvent>) {
        while let Ok(event) = events.try_recv() {
            self.emit(&event);
        }
    }
}

/// Print fallback that writes the plain-text certificate to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrinter;

impl PrintFallback for TerminalPrinter {
    fn print(&self, view: &CertificateView) -> Result<(), ExportError> {
        println!("{}", CertificateFormatter::to_text(view));
        Ok(())
    }
}
