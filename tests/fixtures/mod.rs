//! Shared collaborators and sessions for the integration suite

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use parking_lot::Mutex;

use securewiper::certificate::{CertificateView, PrintFallback, RasterImage, Rasterizer};
use securewiper::error::{ExportError, HashError};
use securewiper::{
    AppConfig, Digester, HashAlgorithm, InstantPacer, ManualClock, Session, SessionBuilder, TargetFile,
};

pub const SEED: u64 = 0x5EC0_12E;

pub fn start_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 16, 14, 5, 9)
        .unwrap()
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start_time()))
}

/// The 2048-byte document used across scenarios
pub fn secret_docx() -> TargetFile {
    let bytes: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();
    TargetFile::from_bytes("secret.docx", bytes)
}

/// Seeded, zero-delay session with a recording printer
pub fn builder(printer: Arc<RecordingPrinter>) -> SessionBuilder {
    Session::builder(AppConfig::default())
        .clock(fixed_clock())
        .pacer(Arc::new(InstantPacer))
        .printer(printer)
        .seed(SEED)
}

pub fn session() -> Session {
    builder(Arc::default()).build().unwrap()
}

#[derive(Default)]
pub struct RecordingPrinter {
    printed: Mutex<Vec<String>>,
}

impl RecordingPrinter {
    pub fn count(&self) -> usize {
        self.printed.lock().len()
    }

    pub fn titles(&self) -> Vec<String> {
        self.printed.lock().clone()
    }
}

impl PrintFallback for RecordingPrinter {
    fn print(&self, view: &CertificateView) -> Result<(), ExportError> {
        self.printed.lock().push(view.title.clone());
        Ok(())
    }
}

pub struct FailingDigester;

impl Digester for FailingDigester {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn digest(&self, _bytes: &[u8]) -> Result<String, HashError> {
        Err(HashError::ComputationError("secure enclave unavailable".into()))
    }
}

pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, _view: &CertificateView) -> Result<RasterImage, ExportError> {
        Err(ExportError::Rasterization("canvas context lost".into()))
    }
}

/// Each reading is one second earlier than the previous one
pub struct RewindingClock {
    current: Mutex<DateTime<FixedOffset>>,
}

impl RewindingClock {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(start_time()),
        }
    }
}

impl securewiper::Clock for RewindingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let mut current = self.current.lock();
        let now = *current;
        *current = now - chrono::Duration::seconds(1);
        now
    }
}
