//! SecureWiper: simulated secure-erasure engine and certificate pipeline
//!
//! The engine walks a fixed multi-pass overwrite sequence over a selected file,
//! publishing status, log and progress telemetry as it goes, and issues a
//! certificate of destruction on success. No storage is actually modified.
//!
//! Layout:
//! - [`session`]: owned application state and the user controls
//! - [`simulator`]: the pass/phase/sub-step state machine
//! - [`telemetry`]: log, progress and event publication
//! - [`certificate`]: record building, presentation, PDF export and print fallback
//! - [`hash`], [`config`], [`types`], [`utils`]: supporting pieces

pub mod certificate;
pub mod config;
pub mod console;
pub mod error;
pub mod hash;
pub mod session;
pub mod simulator;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use certificate::{
    CertificateExporter, CertificateFormat, CertificateFormatter, CertificateView, ExportOutcome, ExportedDocument,
    PrintFallback,
};
pub use config::{AppConfig, ComplianceTier, PacingConfig, PassCount, SimulationConfig};
pub use console::{ConsoleRenderer, TerminalPrinter};
pub use error::{Error, Result};
pub use hash::{Digester, HashAlgorithm, HashDigester};
pub use session::{Session, SessionBuilder};
pub use simulator::{InstantPacer, Pacer, Simulator, TokioPacer, WipePhase};
pub use telemetry::{LogEntry, ProgressState, Severity, TelemetryEvent};
pub use types::{CertificateRecord, RunStatus, TargetFile};
pub use utils::{Clock, Logger, ManualClock, Metrics, SystemClock};
