//! Sheetboard Render Library
//!
//! Renderer abstraction, the CPU raster surface, and multi-page PDF export.

mod export;
mod raster;
mod renderer;

pub use export::{EXPORT_FILE_NAME, ExportError, POINTS_PER_PIXEL, PdfExporter};
pub use raster::RasterSurface;
pub use renderer::{RenderResult, Renderer, RendererError};
