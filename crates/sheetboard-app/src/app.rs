//! Main application state wiring input, model, surface and export together.

use crate::ui::UiAction;
use serde::{Deserialize, Serialize};
use kurbo::Point;
use sheetboard_core::canvas::Canvas;
use sheetboard_core::document::SheetError;
use sheetboard_core::geometry::DEFAULT_HIT_THRESHOLD;
use sheetboard_core::input::PointerEvent;
use sheetboard_core::router::{InputRouter, Repaint};
use sheetboard_core::shapes::{ColorParseError, SerializableColor, StrokeStyle};
use sheetboard_core::tools::ToolKind;
use sheetboard_render::{
    EXPORT_FILE_NAME, ExportError, PdfExporter, RasterSurface, Renderer, RendererError,
};
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// Rejected user input that leaves the application unchanged.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, AppError::Sheet(_) | AppError::Color(_))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Drawing surface width in pixels.
    pub width: u32,
    /// Drawing surface height in pixels (window height minus the toolbar).
    pub height: u32,
    /// Top-left of the drawing surface in client coordinates, below the toolbar.
    pub surface_origin: Point,
    pub background_color: SerializableColor,
    pub default_color: SerializableColor,
    pub default_width: f64,
    pub hit_threshold: f64,
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sheetboard".to_string(),
            width: 1280,
            height: 750,
            surface_origin: Point::new(0.0, 50.0),
            background_color: SerializableColor::transparent(),
            default_color: SerializableColor::black(),
            default_width: StrokeStyle::DEFAULT_WIDTH,
            hit_threshold: DEFAULT_HIT_THRESHOLD,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// Main application.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    canvas: Canvas,
    router: InputRouter,
    surface: RasterSurface,
    /// Directory the export action writes into.
    output_dir: PathBuf,
}

impl App {
    /// Create the application with an empty single-sheet document.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let surface = RasterSurface::new(config.width, config.height, config.background_color.into())?;
        let mut canvas = Canvas::new();
        canvas.surface_origin = config.surface_origin;
        canvas.tool_manager.current_style = StrokeStyle::new(config.default_color, config.default_width);
        canvas.tool_manager.hit_threshold = config.hit_threshold;

        log::info!("{} ready ({}x{})", config.title, config.width, config.height);
        Ok(Self {
            config,
            canvas,
            router: InputRouter::new(),
            surface,
            output_dir: PathBuf::from("."),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// The interactive drawing surface.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Where the export action writes the PDF.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.config.export_file_name)
    }

    /// Labels for the sheet picker.
    pub fn sheet_labels(&self) -> Vec<String> {
        self.canvas.document.sheet_labels()
    }

    /// Route a pointer event and bring the surface up to date.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let repaint = self.router.dispatch(&mut self.canvas, event);
        self.repaint(&repaint);
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let repaint = self.router.cancel();
        self.canvas.set_tool(tool);
        self.repaint(&repaint);
    }

    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), AppError> {
        self.canvas.tool_manager.set_color_hex(hex)?;
        Ok(())
    }

    pub fn set_width(&mut self, width: f64) {
        self.canvas.tool_manager.set_width(width);
    }

    /// Append a sheet, make it active and redraw. Returns its index.
    pub fn new_sheet(&mut self) -> usize {
        self.router.cancel();
        let index = self.canvas.add_sheet();
        self.redraw();
        index
    }

    /// Switch to another sheet and redraw; an invalid index changes nothing.
    pub fn switch_sheet(&mut self, index: usize) -> Result<(), AppError> {
        self.canvas.switch_sheet(index)?;
        self.router.cancel();
        self.redraw();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> usize {
        let removed = self.canvas.delete_selected();
        self.redraw();
        removed
    }

    pub fn cancel_selection(&mut self) {
        self.canvas.cancel_selection();
        self.redraw();
    }

    /// Move the drawing surface within the client area, e.g. after a
    /// toolbar layout change. Touch positions are taken relative to it.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.canvas.surface_origin = origin;
    }

    /// Resize the surface keeping its pixels, then redraw from the model.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), AppError> {
        self.surface.resize(width, height)?;
        self.redraw();
        Ok(())
    }

    /// Render every sheet to PDF bytes at the current surface size.
    pub fn export_pdf(&self) -> Result<Vec<u8>, AppError> {
        let exporter = PdfExporter::new(self.surface.width(), self.surface.height())?;
        Ok(exporter.export(&self.canvas.document)?)
    }

    /// Export every sheet to [`App::export_path`].
    pub fn save_pdf(&self) -> Result<PathBuf, AppError> {
        let path = self.export_path();
        let exporter = PdfExporter::new(self.surface.width(), self.surface.height())?;
        exporter.save(&self.canvas.document, &path)?;
        Ok(path)
    }

    /// Apply one toolbar or pointer action.
    pub fn handle_ui_action(&mut self, action: &UiAction) -> Result<(), AppError> {
        match action {
            UiAction::SetTool { tool } => self.set_tool(*tool),
            UiAction::SetColor { color } => self.set_color_hex(color)?,
            UiAction::SetWidth { width } => self.set_width(*width),
            UiAction::Pointer { event } => self.handle_pointer(event),
            UiAction::NewSheet => {
                self.new_sheet();
            }
            UiAction::SwitchSheet { index } => self.switch_sheet(*index)?,
            UiAction::DeleteSelected => {
                let removed = self.delete_selected();
                log::debug!("Deleted {} selected stroke(s)", removed);
            }
            UiAction::CancelSelection => self.cancel_selection(),
            UiAction::Resize { width, height } => self.resize(*width, *height)?,
            UiAction::SetSurfaceOrigin { x, y } => self.set_surface_origin(Point::new(*x, *y)),
            UiAction::ExportPdf => {
                if let Err(e) = self.save_pdf() {
                    log::error!("Failed to export PDF: {}", e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn redraw(&mut self) {
        self.repaint(&Repaint::Full);
    }

    fn repaint(&mut self, repaint: &Repaint) {
        self.surface.apply(
            repaint,
            self.canvas.document.active_sheet(),
            self.router.lasso_polygon(),
        );
    }
}
