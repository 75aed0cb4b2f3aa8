//! Single-page PDF assembly around a rasterized certificate

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use super::raster::RasterImage;
use crate::error::ExportError;

/// A4 width in points
pub const A4_WIDTH_PT: u32 = 595;

const IMAGE_NAME: &str = "Im0";

pub trait DocumentAssembler: Send + Sync {
    fn assemble(&self, image: &RasterImage) -> Result<Vec<u8>, ExportError>;
}

/// Places the image at full page width; page height follows its aspect ratio
#[derive(Debug, Clone)]
pub struct PdfAssembler {
    pub page_width_pt: u32,
    pub producer: String,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self {
            page_width_pt: A4_WIDTH_PT,
            producer: "SecureWiper".into(),
        }
    }
}

impl PdfAssembler {
    pub fn page_height_for(&self, image: &RasterImage) -> u32 {
        let (width, height) = (u64::from(image.width()), u64::from(image.height()));
        let height = height * u64::from(self.page_width_pt);
        ((height + width / 2) / width).max(1) as u32
    }
}

impl DocumentAssembler for PdfAssembler {
    fn assemble(&self, image: &RasterImage) -> Result<Vec<u8>, ExportError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::Assembly("Cannot place an empty image".into()));
        }
        let page_width = i64::from(self.page_width_pt);
        let page_height = i64::from(self.page_height_for(image));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(i64::from(image.width())),
                "Height" => Object::Integer(i64::from(image.height())),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
            },
            image.as_rgb().to_vec(),
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(page_width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(page_height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Assembly(format!("Content stream: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    IMAGE_NAME => image_id,
                },
            },
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(page_width),
                Object::Integer(page_height),
            ],
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::String(self.producer.as_bytes().to_vec(), StringFormat::Literal),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ExportError::Assembly(format!("Serialization: {}", e)))?;
        debug!(len = bytes.len(), page_height, "assembled certificate document");
        Ok(bytes)
    }
}
