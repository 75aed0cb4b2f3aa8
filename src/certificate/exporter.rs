//! Certificate export with a print fallback

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, instrument};

use super::document::{DocumentAssembler, PdfAssembler};
use super::raster::{GlyphRasterizer, Rasterizer};
use super::view::CertificateView;
use crate::error::{ExportError, Result};

/// Platform print path used when document synthesis fails
pub trait PrintFallback: Send + Sync {
    fn print(&self, view: &CertificateView) -> std::result::Result<(), ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Writes the document into `dir` under its own file name
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!("💾 Certificate written to {}", path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(ExportedDocument),
    PrintFallback { reason: String, printed: bool },
}

impl ExportOutcome {
    pub fn is_exported(&self) -> bool {
        matches!(self, ExportOutcome::Exported(_))
    }

    pub fn document(&self) -> Option<&ExportedDocument> {
        match self {
            ExportOutcome::Exported(doc) => Some(doc),
            ExportOutcome::PrintFallback { .. } => None,
        }
    }
}

pub struct CertificateExporter {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn DocumentAssembler>,
    printer: Arc<dyn PrintFallback>,
    file_prefix: String,
}

impl CertificateExporter {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        assembler: Arc<dyn DocumentAssembler>,
        printer: Arc<dyn PrintFallback>,
        file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            rasterizer,
            assembler,
            printer,
            file_prefix: file_prefix.into(),
        }
    }

    /// Glyph rasterizer and PDF assembler with the given print fallback
    pub fn with_defaults(printer: Arc<dyn PrintFallback>, file_prefix: impl Into<String>) -> Self {
        Self::new(
            Arc::new(GlyphRasterizer::default()),
            Arc::new(PdfAssembler::default()),
            printer,
            file_prefix,
        )
    }

    pub fn file_name_for(&self, certificate_id: &str) -> String {
        format!("{}_Certificate_{}.pdf", self.file_prefix, certificate_id)
    }

    pub fn printer(&self) -> &dyn PrintFallback {
        self.printer.as_ref()
    }

    /// Produces a document, or prints the view when any step fails
    #[instrument(skip_all, fields(certificate_id = view.certificate_id().unwrap_or("pending")))]
    pub fn export(&self, view: &CertificateView) -> ExportOutcome {
        match self.synthesize(view) {
            Ok(document) => {
                info!("📄 Exported {} ({} bytes)", document.file_name, document.bytes.len());
                ExportOutcome::Exported(document)
            }
            Err(e) => {
                error!("PDF generation failed: {}", e);
                let printed = match self.printer.print(view) {
                    Ok(()) => true,
                    Err(print_err) => {
                        error!("Print fallback failed: {}", print_err);
                        false
                    }
                };
                ExportOutcome::PrintFallback {
                    reason: e.to_string(),
                    printed,
                }
            }
        }
    }

    fn synthesize(&self, view: &CertificateView) -> std::result::Result<ExportedDocument, ExportError> {
        let certificate_id = view
            .certificate_id()
            .ok_or_else(|| ExportError::Rasterization("No certificate to export".into()))?;
        let image = self.rasterizer.rasterize(view)?;
        let bytes = self.assembler.assemble(&image)?;
        Ok(ExportedDocument {
            file_name: self.file_name_for(certificate_id),
            bytes,
        })
    }
}
