//! Rasterizes a certificate view into an RGB bitmap
//!
//! The layout mirrors the printed certificate: white page, 8 px blue outer frame,
//! 2 px gold inner frame, centered headings, a label/value table and a QR code of
//! the verification URL under its caption. All layout units are multiplied by the
//! rasterizer's scale factor.

use image::{ImageBuffer, Rgb, RgbImage};
use qrcode::{Color, QrCode};

use super::glyphs::{self, CELL_HEIGHT, CELL_WIDTH, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::view::CertificateView;
use crate::error::ExportError;

pub const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const FRAME_BLUE: Rgb<u8> = Rgb([0x0d, 0x47, 0xa1]);
pub const FRAME_GOLD: Rgb<u8> = Rgb([0xc9, 0xa4, 0x4c]);
pub const QR_DARK: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
const INK: Rgb<u8> = Rgb([0x1f, 0x29, 0x37]);
const MUTED: Rgb<u8> = Rgb([0x4b, 0x55, 0x63]);
const SUBTLE: Rgb<u8> = Rgb([0x9c, 0xa3, 0xaf]);
const MONO_INK: Rgb<u8> = Rgb([0x1e, 0x3a, 0x8a]);
const RULE: Rgb<u8> = Rgb([0xe5, 0xe7, 0xeb]);

pub const MARGIN: u32 = 16;
pub const OUTER_FRAME: u32 = 8;
pub const FRAME_GAP: u32 = 8;
pub const INNER_FRAME: u32 = 2;
const PADDING: u32 = 24;
const INSET: u32 = MARGIN + OUTER_FRAME + FRAME_GAP + INNER_FRAME + PADDING;
const LABEL_COLUMNS: usize = 18;

/// Side of one QR module in layout units
pub const QR_MODULE: u32 = 3;
/// Light border around the symbol, in modules
pub const QR_QUIET_ZONE: u32 = 4;

/// 8-bit RGB bitmap backed by an [`RgbImage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buffer: RgbImage,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.buffer.get_pixel_checked(x, y).copied()
    }

    pub fn buffer(&self) -> &RgbImage {
        &self.buffer
    }

    /// Packed RGB samples, row-major
    pub fn as_rgb(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    pub fn into_rgb(self) -> Vec<u8> {
        self.buffer.into_raw()
    }

    /// Fills a rectangle, clipped to the image
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        let x_end = x.saturating_add(w).min(self.width());
        let y_end = y.saturating_add(h).min(self.height());
        for row in y..y_end {
            for col in x..x_end {
                self.buffer.put_pixel(col, row, color);
            }
        }
    }

    /// Draws a rectangular frame of the given thickness, inside the bounds
    pub fn stroke_rect(&mut self, x: u32, y: u32, w: u32, h: u32, thickness: u32, color: Rgb<u8>) {
        self.fill_rect(x, y, w, thickness, color);
        self.fill_rect(x, y + h.saturating_sub(thickness), w, thickness, color);
        self.fill_rect(x, y, thickness, h, color);
        self.fill_rect(x + w.saturating_sub(thickness), y, thickness, h, color);
    }
}

/// Module grid of a QR symbol, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    pub width: u32,
    dark: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(data: &str) -> Result<Self, ExportError> {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| ExportError::Rasterization(format!("QR encoding: {}", e)))?;
        Ok(Self {
            width: code.width() as u32,
            dark: code.to_colors().into_iter().map(|c| c == Color::Dark).collect(),
        })
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.width && self.dark[(y * self.width + x) as usize]
    }

    /// Side length including the quiet zone, in layout units
    pub fn extent(&self) -> u32 {
        (self.width + 2 * QR_QUIET_ZONE) * QR_MODULE
    }
}

pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, view: &CertificateView) -> Result<RasterImage, ExportError>;
}

#[derive(Debug, Clone)]
struct TextLine {
    text: String,
    size: u32,
    color: Rgb<u8>,
    centered: bool,
}

#[derive(Debug, Clone)]
enum Block {
    Line(TextLine),
    Space(u32),
    Rule,
    Qr(QrMatrix),
}

impl Block {
    fn height(&self) -> u32 {
        match self {
            Block::Line(line) => CELL_HEIGHT * line.size,
            Block::Space(h) => *h,
            Block::Rule => 5,
            Block::Qr(matrix) => matrix.extent(),
        }
    }
}

/// Rasterizer drawing with the built-in bitmap font
#[derive(Debug, Clone)]
pub struct GlyphRasterizer {
    /// Page width in layout units
    pub width: u32,
    pub scale: u32,
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self { width: 850, scale: 2 }
    }
}

impl GlyphRasterizer {
    pub fn new(width: u32, scale: u32) -> Self {
        Self { width, scale }
    }

    fn content_width(&self) -> u32 {
        self.width.saturating_sub(2 * INSET)
    }

    fn columns(&self, size: u32) -> usize {
        (self.content_width() / (CELL_WIDTH * size)) as usize
    }

    fn layout(&self, view: &CertificateView) -> Result<Vec<Block>, ExportError> {
        let columns = self.columns(1);
        let mut blocks = Vec::new();
        let centered = |blocks: &mut Vec<Block>, text: &str, size: u32, color: Rgb<u8>| {
            for chunk in wrap(text, self.columns(size)) {
                blocks.push(Block::Line(TextLine {
                    text: chunk,
                    size,
                    color,
                    centered: true,
                }));
            }
        };

        blocks.push(Block::Space(8));
        centered(&mut blocks, &view.title, 2, FRAME_BLUE);
        blocks.push(Block::Space(4));
        centered(&mut blocks, &view.subtitle.to_uppercase(), 1, MUTED);
        blocks.push(Block::Space(16));
        centered(&mut blocks, &view.statement, 1, INK);
        blocks.push(Block::Space(16));
        blocks.push(Block::Rule);

        let value_columns = columns.saturating_sub(LABEL_COLUMNS).max(1);
        for row in &view.rows {
            let color = if row.monospace { MONO_INK } else { INK };
            let chunks = if row.monospace {
                hard_wrap(&row.value, value_columns)
            } else {
                wrap(&row.value, value_columns)
            };
            for (i, chunk) in chunks.into_iter().enumerate() {
                let label = if i == 0 { row.label.to_uppercase() } else { String::new() };
                blocks.push(Block::Line(TextLine {
                    text: format!("{:<width$}{}", label, chunk, width = LABEL_COLUMNS),
                    size: 1,
                    color,
                    centered: false,
                }));
            }
            blocks.push(Block::Rule);
        }

        blocks.push(Block::Space(24));
        centered(&mut blocks, &view.signature, 2, INK);
        blocks.push(Block::Rule);
        centered(&mut blocks, &view.signatory.to_uppercase(), 1, MUTED);
        blocks.push(Block::Space(16));
        centered(&mut blocks, &view.verification_caption.to_uppercase(), 1, MUTED);
        blocks.push(Block::Qr(QrMatrix::encode(&view.verification_url)?));
        centered(&mut blocks, &view.verification_url, 1, FRAME_BLUE);
        blocks.push(Block::Space(24));
        blocks.push(Block::Rule);
        centered(&mut blocks, &view.footer, 1, SUBTLE);
        centered(&mut blocks, &view.contact, 1, SUBTLE);
        Ok(blocks)
    }

    /// Top-left corner of the first module of a symbol whose block starts at `y`
    fn qr_origin(&self, matrix: &QrMatrix, y: u32) -> (u32, u32) {
        let x = INSET + self.content_width().saturating_sub(matrix.extent()) / 2;
        let quiet = QR_QUIET_ZONE * QR_MODULE;
        (x + quiet, y + quiet)
    }

    fn draw_qr(&self, image: &mut RasterImage, matrix: &QrMatrix, y: u32) {
        let s = self.scale;
        let (x0, y0) = self.qr_origin(matrix, y);
        for my in 0..matrix.width {
            for mx in 0..matrix.width {
                if matrix.is_dark(mx, my) {
                    image.fill_rect(
                        (x0 + mx * QR_MODULE) * s,
                        (y0 + my * QR_MODULE) * s,
                        QR_MODULE * s,
                        QR_MODULE * s,
                        QR_DARK,
                    );
                }
            }
        }
    }

    fn draw_text(&self, image: &mut RasterImage, line: &TextLine, x: u32, y: u32) {
        let s = self.scale;
        let mut cursor = x;
        for c in line.text.chars() {
            let glyph = glyphs::glyph(c);
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if glyphs::is_set(glyph, gx, gy) {
                        image.fill_rect(
                            (cursor + gx * line.size) * s,
                            (y + gy * line.size) * s,
                            line.size * s,
                            line.size * s,
                            line.color,
                        );
                    }
                }
            }
            cursor += CELL_WIDTH * line.size;
        }
    }
}

impl Rasterizer for GlyphRasterizer {
    fn rasterize(&self, view: &CertificateView) -> Result<RasterImage, ExportError> {
        if view.is_pending() {
            return Err(ExportError::Rasterization("No certificate to render".into()));
        }
        if self.scale == 0 {
            return Err(ExportError::Rasterization("Scale must be at least 1".into()));
        }
        if self.columns(2) <= LABEL_COLUMNS {
            return Err(ExportError::Rasterization(format!(
                "Page width {} is too narrow for the certificate layout",
                self.width
            )));
        }

        let blocks = self.layout(view)?;
        let height = 2 * INSET + blocks.iter().map(Block::height).sum::<u32>();
        let s = self.scale;
        let mut image = RasterImage::new(self.width * s, height * s, WHITE);

        image.stroke_rect(
            MARGIN * s,
            MARGIN * s,
            (self.width - 2 * MARGIN) * s,
            (height - 2 * MARGIN) * s,
            OUTER_FRAME * s,
            FRAME_BLUE,
        );
        let inner = MARGIN + OUTER_FRAME + FRAME_GAP;
        image.stroke_rect(
            inner * s,
            inner * s,
            (self.width - 2 * inner) * s,
            (height - 2 * inner) * s,
            INNER_FRAME * s,
            FRAME_GOLD,
        );

        let content_width = self.content_width();
        let mut y = INSET;
        for block in &blocks {
            match block {
                Block::Line(line) => {
                    let text_width = line.text.chars().count() as u32 * CELL_WIDTH * line.size;
                    let x = if line.centered {
                        INSET + content_width.saturating_sub(text_width) / 2
                    } else {
                        INSET
                    };
                    self.draw_text(&mut image, line, x, y);
                }
                Block::Rule => image.fill_rect(INSET * s, (y + 2) * s, content_width * s, s, RULE),
                Block::Qr(matrix) => self.draw_qr(&mut image, matrix, y),
                Block::Space(_) => {}
            }
            y += block.height();
        }

        Ok(image)
    }
}

/// Word wrap; words longer than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in hard_wrap(word, width) {
            let needed = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 1 + piece.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits into fixed-width chunks regardless of word boundaries
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width.max(1)).map(|c| c.iter().collect()).collect()
}
