//! Certificate issuance, presentation and export
//!
//! A successful run produces a [`CertificateRecord`](crate::types::CertificateRecord)
//! through [`builder::build`]. The record is presented as a [`CertificateView`],
//! which can be formatted as a report or rasterized and assembled into a PDF by the
//! [`CertificateExporter`]. When export fails the view is handed to a
//! [`PrintFallback`].

pub mod builder;
pub mod document;
pub mod exporter;
pub mod formatter;
pub mod glyphs;
pub mod raster;
pub mod templates;
pub mod view;

pub use self::{
    builder::{build, CertificateInputs},
    document::{DocumentAssembler, PdfAssembler},
    exporter::{CertificateExporter, ExportOutcome, ExportedDocument, PrintFallback},
    formatter::{CertificateFormat, CertificateFormatter},
    raster::{GlyphRasterizer, RasterImage, Rasterizer},
    view::{CertificateRow, CertificateView},
};
