//! Multi-page PDF export, one page per sheet.

use crate::raster::RasterSurface;
use crate::renderer::{Renderer, RendererError};
use lopdf::content::{Content, Operation};
use lopdf::{Document as PdfDocument, Object, ObjectId, Stream, dictionary};
use sheetboard_core::document::{Document, Sheet};
use std::path::Path;
use thiserror::Error;

/// File name used by the export action.
pub const EXPORT_FILE_NAME: &str = "Whiteboard_All_Sheets.pdf";

/// PDF points per surface pixel (72 pt per inch at 96 px per inch).
pub const POINTS_PER_PIXEL: f64 = 0.75;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot render export page: {0}")]
    Render(#[from] RendererError),
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders every sheet of a document onto its own white page.
#[derive(Debug, Clone, Copy)]
pub struct PdfExporter {
    width: u32,
    height: u32,
}

impl PdfExporter {
    /// Exporter producing pages of `width` x `height` surface pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, ExportError> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidSize { width, height }.into());
        }
        Ok(Self { width, height })
    }

    /// Page size in PDF points.
    pub fn page_size(&self) -> (f64, f64) {
        (
            f64::from(self.width) * POINTS_PER_PIXEL,
            f64::from(self.height) * POINTS_PER_PIXEL,
        )
    }

    /// Draw one sheet onto a fresh white offscreen surface.
    pub fn render_sheet(&self, sheet: &Sheet) -> Result<RasterSurface, ExportError> {
        let mut surface = RasterSurface::white(self.width, self.height)?;
        surface.redraw(sheet);
        Ok(surface)
    }

    /// Build the PDF bytes; pages follow sheet order.
    pub fn export(&self, document: &Document) -> Result<Vec<u8>, ExportError> {
        let mut pdf = PdfDocument::with_version("1.4");
        let id_pages = pdf.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(document.sheet_count());
        for (index, sheet) in document.sheets().iter().enumerate() {
            let surface = self.render_sheet(sheet)?;
            let id_page = self.add_page(&mut pdf, id_pages, &surface)?;
            log::debug!("Rendered sheet {} ({} strokes) to page", index + 1, sheet.len());
            kids.push(id_page.into());
        }

        let count = kids.len() as i64;
        pdf.set_object(
            id_pages,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            },
        );
        let id_catalog = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => id_pages,
        });
        pdf.trailer.set("Root", id_catalog);
        pdf.compress();

        let mut buffer = Vec::new();
        pdf.save_to(&mut buffer)?;
        log::info!("Exported {} sheet(s) to PDF ({} bytes)", count, buffer.len());
        Ok(buffer)
    }

    /// Export and write the PDF to `path`.
    pub fn save(&self, document: &Document, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let bytes = self.export(document)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("Saved {}", path.as_ref().display());
        Ok(())
    }

    fn add_page(
        &self,
        pdf: &mut PdfDocument,
        parent: ObjectId,
        surface: &RasterSurface,
    ) -> Result<ObjectId, ExportError> {
        let (page_width, page_height) = self.page_size();
        let (page_width, page_height) = (page_width as f32, page_height as f32);

        let id_image = pdf.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(surface.width()),
                "Height" => i64::from(surface.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            surface.to_rgb_bytes(),
        ));

        // Scale the unit image square to the full page
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        page_width.into(),
                        0_i64.into(),
                        0_i64.into(),
                        page_height.into(),
                        0_i64.into(),
                        0_i64.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let id_content = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));

        Ok(pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => parent,
            "MediaBox" => vec![0_i64.into(), 0_i64.into(), page_width.into(), page_height.into()],
            "Contents" => id_content,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => id_image,
                },
            },
        }))
    }
}
