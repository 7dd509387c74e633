//! Recorded sessions: configuration overrides plus a list of actions to replay.

use crate::app::{App, AppConfig, AppError};
use crate::ui::UiAction;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A replayable whiteboard session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub config: AppConfig,
    #[serde(default)]
    pub actions: Vec<UiAction>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let session = Self::from_json(&json)?;
        log::info!(
            "Loaded session {} ({} actions)",
            path.as_ref().display(),
            session.actions.len()
        );
        Ok(session)
    }

    /// Replay every action on a fresh [`App`] exporting into `output_dir`.
    ///
    /// Rejected input (bad colors, missing sheets) is logged and skipped, the
    /// same way the toolbar ignores it. Any other failure stops the replay.
    pub fn replay(&self, output_dir: impl AsRef<Path>) -> Result<App, AppError> {
        let mut app = App::new(self.config.clone())?;
        app.set_output_dir(output_dir.as_ref());

        for (step, action) in self.actions.iter().enumerate() {
            match app.handle_ui_action(action) {
                Ok(()) => {}
                Err(e) if e.is_rejected_input() => {
                    log::warn!("Action {} ({:?}) rejected: {}", step, action, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(app)
    }
}

/// Load a session file and replay it.
pub fn run_session(path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<App, AppError> {
    Session::load(path)?.replay(output_dir)
}
