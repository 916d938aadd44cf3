use std::path::PathBuf;

use eframe::egui::{self, Align2, Button, Color32, Context, Key, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::Colormap;
use crate::config::{
    ABOUT_SHORTCUT, APP_NAME, EXIT_SHORTCUT, HELP_SHORTCUT, OPEN_SHORTCUT, SETTINGS_SHORTCUT,
};
use crate::data::metadata::Metadata;
use crate::state::{AppState, ViewerEvent, Window};

/// Something the menus want that is not a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Exit,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<ViewerEvent>) -> Option<MenuAction> {
    let mut action = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let open = Button::new("Open…").shortcut_text(ui.ctx().format_shortcut(&OPEN_SHORTCUT));
            if ui.add(open).clicked() {
                ui.close_menu();
                if let Some(path) = open_file_dialog() {
                    events.push(ViewerEvent::FileChosen(path));
                }
            }
            let exit = Button::new("Exit").shortcut_text(ui.ctx().format_shortcut(&EXIT_SHORTCUT));
            if ui.add(exit).clicked() {
                ui.close_menu();
                action = Some(MenuAction::Exit);
            }
        });

        ui.menu_button("Settings", |ui: &mut Ui| {
            let settings =
                Button::new("Settings…").shortcut_text(ui.ctx().format_shortcut(&SETTINGS_SHORTCUT));
            if ui.add(settings).clicked() {
                ui.close_menu();
                events.push(ViewerEvent::ShowWindow(Window::Settings));
            }
        });

        ui.menu_button("Help", |ui: &mut Ui| {
            let help = Button::new("Help").shortcut_text(ui.ctx().format_shortcut(&HELP_SHORTCUT));
            if ui.add(help).clicked() {
                ui.close_menu();
                events.push(ViewerEvent::ShowWindow(Window::Help));
            }
            let about = Button::new("About").shortcut_text(ui.ctx().format_shortcut(&ABOUT_SHORTCUT));
            if ui.add(about).clicked() {
                ui.close_menu();
                events.push(ViewerEvent::ShowWindow(Window::About));
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}  [{}]  band {}",
                session.metadata.filename, session.variable, session.band
            ));
        }
    });
    action
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Image")
        .add_filter("Image File", &["mat"])
        .pick_file()
}

// ---------------------------------------------------------------------------
// Band selector (below the band image)
// ---------------------------------------------------------------------------

/// "Choose Band" field, "Load Band" button and, for files with several
/// cubes, a variable picker. Disabled until a file is open.
pub fn band_selector(ui: &mut Ui, state: &mut AppState, events: &mut Vec<ViewerEvent>) {
    let loaded = state.is_loaded();
    ui.add_enabled_ui(loaded, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Choose Band ->");
            let hint = match &state.session {
                Some(s) => format!("0 – {}", s.cube.bands() - 1),
                None => String::new(),
            };
            let field = ui.add(
                TextEdit::singleline(&mut state.band_input)
                    .desired_width(80.0)
                    .hint_text(hint),
            );
            let entered = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Load Band").clicked() || entered {
                events.push(ViewerEvent::BandSubmitted(state.band_input.clone()));
            }

            let Some(session) = &state.session else {
                return;
            };
            if session.variables.len() > 1 {
                ui.separator();
                ui.label("Variable");
                egui::ComboBox::from_id_salt("variable")
                    .selected_text(&session.variable)
                    .show_ui(ui, |ui: &mut Ui| {
                        for name in &session.variables {
                            if ui.selectable_label(*name == session.variable, name).clicked() {
                                events.push(ViewerEvent::VariableSelected(name.clone()));
                            }
                        }
                    });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Metadata table
// ---------------------------------------------------------------------------

/// Nine-row property/value table.
pub fn metadata_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Metadata");
    ui.separator();

    let rows = match &state.session {
        Some(session) => session.metadata.rows(),
        None => Metadata::empty_rows(),
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Property");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (label, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(label);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Windows: notice, settings, help, about
// ---------------------------------------------------------------------------

/// Centered notice with a single OK button.
pub fn notice_window(ctx: &Context, state: &AppState, events: &mut Vec<ViewerEvent>) {
    let Some(notice) = &state.notice else {
        return;
    };
    egui::Window::new(RichText::new(&notice.title).strong())
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(&notice.message).color(Color32::from_rgb(200, 60, 60)));
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                let ok = ui.button("OK");
                if ok.clicked() || ui.input(|i| i.key_pressed(Key::Enter)) {
                    events.push(ViewerEvent::DismissNotice);
                }
            });
        });
}

pub fn settings_window(ctx: &Context, state: &AppState, events: &mut Vec<ViewerEvent>) {
    if !state.show_settings {
        return;
    }
    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            let mut dark = state.settings.dark_mode;
            if ui.checkbox(&mut dark, "Dark mode").changed() {
                events.push(ViewerEvent::SetDarkMode(dark));
            }

            ui.separator();
            ui.strong("Colormap");
            for colormap in Colormap::ALL {
                let selected = state.settings.colormap == colormap;
                if ui.selectable_label(selected, colormap.name()).clicked() && !selected {
                    events.push(ViewerEvent::SetColormap(colormap));
                }
            }
        });
    if !open {
        events.push(ViewerEvent::CloseWindow(Window::Settings));
    }
}

pub fn help_window(ctx: &Context, state: &AppState, events: &mut Vec<ViewerEvent>) {
    if !state.show_help {
        return;
    }
    let mut open = true;
    egui::Window::new("Help")
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            ui.label("1. File → Open… and pick a .mat file holding a height × width × bands cube.");
            ui.label("2. Type a band index and press Enter or \"Load Band\" to switch bands.");
            ui.label("3. Click a pixel in the band image to plot its spectral signature.");
            ui.label("Drag to pan, scroll to zoom, double-click to reset a plot.");
        });
    if !open {
        events.push(ViewerEvent::CloseWindow(Window::Help));
    }
}

pub fn about_window(ctx: &Context, state: &AppState, events: &mut Vec<ViewerEvent>) {
    if !state.show_about {
        return;
    }
    let mut open = true;
    egui::Window::new("About")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.heading(APP_NAME);
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.label(env!("CARGO_PKG_DESCRIPTION"));
        });
    if !open {
        events.push(ViewerEvent::CloseWindow(Window::About));
    }
}
