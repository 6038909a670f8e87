// src/config/state.rs
use super::options::AppOptions;

/// Transient UI state. Nothing here is persisted.
#[derive(Clone, Debug)]
pub struct GuiState {
    /// DNI text box; only digits are kept.
    pub dni_input: String,

    pub admin_open: bool,
    pub admin_pass: String,

    pub window_w: f32,
    pub window_h: f32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            dni_input: s!(),
            admin_open: false,
            admin_pass: s!(),
            window_w: 460.0,
            window_h: 780.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
