//! Owned application state and its controls
//!
//! A [`Session`] holds the selected target, the pass count, the last issued
//! certificate and the telemetry of the current run. Every control enforces the
//! enable rules of the console: a run needs a target and cannot overlap another
//! run, export needs a completed run with a certificate, print is always allowed.

use std::sync::Arc;

use rand::{rngs::StdRng, RngCore, SeedableRng};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

use crate::certificate::{
    CertificateExporter, CertificateView, DocumentAssembler, ExportOutcome, PdfAssembler, PrintFallback, GlyphRasterizer,
    Rasterizer,
};
use crate::config::{AppConfig, ConfigSection, PassCount, SimulationConfig};
use crate::console::TerminalPrinter;
use crate::error::{Error, Result};
use crate::hash::{Digester, HashDigester};
use crate::simulator::{Pacer, Simulator, TokioPacer};
use crate::telemetry::{LogEntry, ProgressState, Telemetry, TelemetryEvent};
use crate::types::{CertificateRecord, RunStatus, TargetFile};
use crate::utils::metrics::{EXPORTS_COMPLETED, PRINT_FALLBACKS, RUNS_COMPLETED, RUNS_FAILED, RUNS_STARTED, RUN_TIMER};
use crate::utils::{Clock, Metrics, MetricsSnapshot, SystemClock};

/// Collaborators a session is assembled from; unset ones get production defaults
pub struct SessionBuilder {
    config: AppConfig,
    clock: Option<Arc<dyn Clock>>,
    digester: Option<Arc<dyn Digester>>,
    pacer: Option<Arc<dyn Pacer>>,
    rng: Option<Box<dyn RngCore + Send>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    assembler: Option<Arc<dyn DocumentAssembler>>,
    printer: Option<Arc<dyn PrintFallback>>,
}

impl SessionBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clock: None,
            digester: None,
            pacer: None,
            rng: None,
            rasterizer: None,
            assembler: None,
            printer: None,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn digester(mut self, digester: Arc<dyn Digester>) -> Self {
        self.digester = Some(digester);
        self
    }

    pub fn pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    pub fn rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Reproducible sector labels, residue and certificate ids
    pub fn seed(self, seed: u64) -> Self {
        self.rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn assembler(mut self, assembler: Arc<dyn DocumentAssembler>) -> Self {
        self.assembler = Some(assembler);
        self
    }

    pub fn printer(mut self, printer: Arc<dyn PrintFallback>) -> Self {
        self.printer = Some(printer);
        self
    }

    pub fn build(self) -> Result<Session> {
        self.config.validate()?;
        let config = self.config;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let digester = self
            .digester
            .unwrap_or_else(|| Arc::new(HashDigester::new(config.defaults.hash_algorithm)));
        let pacer = self.pacer.unwrap_or_else(|| Arc::new(TokioPacer));
        let rng = self.rng.unwrap_or_else(|| Box::new(StdRng::from_entropy()));
        let printer = self.printer.unwrap_or_else(|| Arc::new(TerminalPrinter));
        let exporter = CertificateExporter::new(
            self.rasterizer.unwrap_or_else(|| Arc::new(GlyphRasterizer::default())),
            self.assembler.unwrap_or_else(|| Arc::new(PdfAssembler::default())),
            printer,
            config.product.product_prefix.clone(),
        );
        let simulator = Simulator::new(
            digester,
            pacer,
            clock.clone(),
            config.pacing.clone(),
            config.product.clone(),
        );

        Ok(Session {
            pass_count: config.defaults.pass_count,
            config,
            target: None,
            certificate: None,
            telemetry: Telemetry::new(clock),
            simulator,
            exporter,
            rng,
            metrics: Metrics::new(),
        })
    }
}

pub struct Session {
    config: AppConfig,
    pass_count: PassCount,
    target: Option<TargetFile>,
    certificate: Option<CertificateRecord>,
    telemetry: Telemetry,
    simulator: Simulator,
    exporter: CertificateExporter,
    rng: Box<dyn RngCore + Send>,
    metrics: Metrics,
}

impl Session {
    pub fn builder(config: AppConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> RunStatus {
        self.telemetry.status()
    }

    pub fn pass_count(&self) -> PassCount {
        self.pass_count
    }

    pub fn target(&self) -> Option<&TargetFile> {
        self.target.as_ref()
    }

    pub fn certificate(&self) -> Option<&CertificateRecord> {
        self.certificate.as_ref()
    }

    pub fn log(&self) -> &[LogEntry] {
        self.telemetry.log().entries()
    }

    pub fn progress(&self) -> &ProgressState {
        self.telemetry.progress()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<TelemetryEvent> {
        self.telemetry.subscribe()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.status() == RunStatus::Running {
            return Err(Error::RunInProgress);
        }
        Ok(())
    }

    fn discard_certificate(&mut self) {
        if self.certificate.take().is_some() {
            self.telemetry.publish(TelemetryEvent::CertificateDiscarded);
        }
    }

    /// Makes `target` the file of the next run; the log restarts with its load entries
    pub fn select_target(&mut self, target: TargetFile) -> Result<()> {
        self.ensure_idle()?;
        self.discard_certificate();
        self.telemetry.clear_log();
        self.telemetry.success(format!("File loaded: {}", target.name));
        self.telemetry
            .info(format!("Metadata: {} KB | {}", target.size_kb(), target.display_type()));
        self.target = Some(target);
        Ok(())
    }

    pub fn set_pass_count(&mut self, pass_count: PassCount) -> Result<()> {
        self.ensure_idle()?;
        debug!(passes = %pass_count, tier = %pass_count.tier(), "pass count selected");
        self.pass_count = pass_count;
        Ok(())
    }

    pub fn can_start(&self) -> bool {
        self.target.is_some() && self.status() != RunStatus::Running
    }

    /// Runs the simulator on the selected target and returns the final status
    ///
    /// Collaborator failures end the run in `Failed` and are not returned as errors.
    #[instrument(skip(self), fields(passes = %self.pass_count))]
    pub async fn start_run(&mut self) -> Result<RunStatus> {
        if self.status() == RunStatus::Running {
            return Err(Error::StartDisabled("a run is already in progress".into()));
        }
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| Error::StartDisabled("no target file selected".into()))?;

        info!("🚦 Starting sanitization of {}", target.name);
        self.metrics.increment_counter(RUNS_STARTED);
        self.metrics.start_timer(RUN_TIMER);
        if self.certificate.take().is_some() {
            self.telemetry.publish(TelemetryEvent::CertificateDiscarded);
        }

        let config = SimulationConfig::new(self.pass_count);
        let outcome = self
            .simulator
            .run(&mut self.telemetry, self.rng.as_mut(), target, config)
            .await;

        match outcome {
            Ok(record) => {
                self.metrics.increment_counter(RUNS_COMPLETED);
                self.certificate = Some(record);
            }
            Err(e) => {
                self.metrics.increment_counter(RUNS_FAILED);
                warn!("Run ended in failure: {}", e);
            }
        }
        if let Some(elapsed) = self.metrics.end_timer(RUN_TIMER) {
            debug!(?elapsed, "run finished");
        }

        Ok(self.status())
    }

    /// Clears target, certificate, log and progress; safe to call repeatedly
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.target = None;
        self.discard_certificate();
        self.telemetry.clear_log();
        self.telemetry.reset_progress();
        self.telemetry.set_status(RunStatus::Idle);
        Ok(())
    }

    pub fn can_export(&self) -> bool {
        self.status() == RunStatus::Completed && self.certificate.is_some()
    }

    /// Current certificate presentation, or the pending placeholder
    pub fn view(&self) -> CertificateView {
        CertificateView::for_record(self.certificate.as_ref())
    }

    pub fn export_certificate(&mut self) -> Result<ExportOutcome> {
        if !self.can_export() {
            return Err(Error::ExportUnavailable(format!(
                "status is {} and no certificate has been issued",
                self.status()
            )));
        }

        self.telemetry.info("Synthesizing PDF document...");
        let outcome = self.exporter.export(&self.view());
        match &outcome {
            ExportOutcome::Exported(_) => {
                self.metrics.increment_counter(EXPORTS_COMPLETED);
                self.telemetry.success("Document successfully exported to local storage.");
            }
            ExportOutcome::PrintFallback { .. } => {
                self.metrics.increment_counter(PRINT_FALLBACKS);
                self.telemetry.error("PDF Generation failed. Redirecting to print fallback.");
            }
        }
        Ok(outcome)
    }

    pub fn print(&self) -> Result<()> {
        self.exporter.printer().print(&self.view())?;
        Ok(())
    }
}
