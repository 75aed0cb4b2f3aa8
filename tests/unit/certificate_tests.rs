use rand::{rngs::StdRng, SeedableRng};

use securewiper::certificate::{build, CertificateInputs, GlyphRasterizer, PdfAssembler, Rasterizer};
use securewiper::certificate::document::DocumentAssembler;
use securewiper::certificate::raster::{QrMatrix, QR_DARK, QR_MODULE};
use securewiper::config::ProductConfig;
use securewiper::types::TargetMetadata;
use securewiper::utils::generate_certificate_id;
use securewiper::{CertificateView, HashAlgorithm, PassCount};

use crate::fixtures;

fn inputs(name: &str, pass_count: PassCount) -> CertificateInputs {
    let mut rng = StdRng::seed_from_u64(fixtures::SEED);
    CertificateInputs {
        target: TargetMetadata {
            name: name.into(),
            size_bytes: 1_234_567,
            mime_type: Some("application/pdf".into()),
        },
        pass_count,
        pre_wipe_hash: "0f".repeat(32),
        post_wipe_hash: "e1".repeat(32),
        hash_algorithm: HashAlgorithm::Sha256,
        certificate_id: generate_certificate_id("SWC", &fixtures::start_time(), &mut rng),
        wipe_timestamp: fixtures::start_time(),
    }
}

#[test]
fn test_custom_product_branding() {
    let product = ProductConfig {
        tool_version: "VaultWiper 2.0".into(),
        volume_path_prefix: "/mnt/vault/".into(),
        verification_base_url: "https://example.test/check/".into(),
        ..ProductConfig::default()
    };
    let record = build(inputs("payroll.pdf", PassCount::One), &product);

    assert_eq!(record.file_path, "/mnt/vault/payroll.pdf");
    assert!(record.verification_url.starts_with("https://example.test/check/SWC-20261016-"));
    assert_eq!(record.tool_version, "VaultWiper 2.0");
}

#[test]
fn test_view_uses_thousands_separator() {
    let record = build(inputs("payroll.pdf", PassCount::Seven), &ProductConfig::default());
    let view = CertificateView::from_record(&record);
    assert_eq!(view.row("File Size"), Some("1,234,567 bytes"));
    assert_eq!(view.row("Number of Passes"), Some("7"));
    assert_eq!(view.row("Compliance"), Some("DoD 5220.22-M"));
}

#[test]
fn test_long_digest_rasterizes_and_assembles() {
    let mut inputs = inputs("archive.tar", PassCount::ThirtyFive);
    inputs.pre_wipe_hash = "ab".repeat(64);
    inputs.hash_algorithm = HashAlgorithm::Sha512;
    let record = build(inputs, &ProductConfig::default());

    let image = GlyphRasterizer::default()
        .rasterize(&CertificateView::from_record(&record))
        .unwrap();
    let assembler = PdfAssembler::default();
    let bytes = assembler.assemble(&image).unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    let (width, height) = (image.width() as u64, image.height() as u64);
    assert_eq!(assembler.page_height_for(&image) as u64, (height * 595 + width / 2) / width);
}

#[test]
fn test_rasterized_certificate_carries_verification_qr() {
    let record = build(inputs("secret.docx", PassCount::Three), &ProductConfig::default());
    let image = GlyphRasterizer::default()
        .rasterize(&CertificateView::from_record(&record))
        .unwrap();

    let matrix = QrMatrix::encode(&record.verification_url).unwrap();
    let dark_pixels = image.buffer().pixels().filter(|px| **px == QR_DARK).count() as u32;
    let module_pixels = (QR_MODULE * 2) * (QR_MODULE * 2);
    let dark_modules = (0..matrix.width)
        .flat_map(|y| (0..matrix.width).map(move |x| (x, y)))
        .filter(|&(x, y)| matrix.is_dark(x, y))
        .count() as u32;
    assert_eq!(dark_pixels, dark_modules * module_pixels);
}
