//! Sheetboard Application
//!
//! The application shell tying pointer input, the drawing surface, sheet
//! management and PDF export together, plus session replay.

mod app;
mod session;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use session::{Session, run_session};
pub use ui::UiAction;
