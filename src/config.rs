use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};

use crate::color::Colormap;

// ---------------------------------------------------------------------------
// Window defaults
// ---------------------------------------------------------------------------

pub const APP_NAME: &str = "Spectral Viewer";
pub const INITIAL_WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

// ---------------------------------------------------------------------------
// Keyboard shortcuts (Ctrl, or Cmd on macOS)
// ---------------------------------------------------------------------------

pub const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
pub const EXIT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
pub const SETTINGS_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND, Key::P);
pub const HELP_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::H);
pub const ABOUT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::A);

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

/// User-adjustable viewer settings. Lives for the session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSettings {
    pub dark_mode: bool,
    pub colormap: Colormap,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            colormap: Colormap::default(),
        }
    }
}

impl ViewerSettings {
    pub fn visuals(&self) -> egui::Visuals {
        if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        }
    }
}
