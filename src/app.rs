use eframe::egui::{self, TextureHandle, TextureOptions};

use crate::config::{
    ABOUT_SHORTCUT, EXIT_SHORTCUT, HELP_SHORTCUT, OPEN_SHORTCUT, SETTINGS_SHORTCUT,
};
use crate::state::{AppState, ViewerEvent, Window};
use crate::ui::panels::{self, MenuAction};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// GPU copy of the band raster, tagged with the render generation it shows.
struct BandTexture {
    generation: u64,
    handle: TextureHandle,
}

pub struct SpectralViewerApp {
    pub state: AppState,
    band_texture: Option<BandTexture>,
}

impl SpectralViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::default();
        cc.egui_ctx.set_visuals(state.settings.visuals());
        Self {
            state,
            band_texture: None,
        }
    }

    /// Replace the texture whenever the raster changed; drop it when
    /// nothing is loaded.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.state.session else {
            self.band_texture = None;
            return;
        };
        let generation = self.state.render_generation;
        if self.band_texture.as_ref().map(|t| t.generation) == Some(generation) {
            return;
        }
        let handle = ctx.load_texture("band_image", session.raster.clone(), TextureOptions::NEAREST);
        self.band_texture = Some(BandTexture { generation, handle });
    }
}

/// Menu shortcuts, consumed before widgets see the keys.
///
/// Cmd+A and Cmd+H are text-editing keys too, so they are left to the
/// focused text field while the user is typing.
fn shortcuts(ctx: &egui::Context, events: &mut Vec<ViewerEvent>) -> Option<MenuAction> {
    let mut action = None;
    let typing = ctx.wants_keyboard_input();
    ctx.input_mut(|i| {
        if i.consume_shortcut(&EXIT_SHORTCUT) {
            action = Some(MenuAction::Exit);
        }
        if i.consume_shortcut(&SETTINGS_SHORTCUT) {
            events.push(ViewerEvent::ShowWindow(Window::Settings));
        }
        if !typing && i.consume_shortcut(&HELP_SHORTCUT) {
            events.push(ViewerEvent::ShowWindow(Window::Help));
        }
        if !typing && i.consume_shortcut(&ABOUT_SHORTCUT) {
            events.push(ViewerEvent::ShowWindow(Window::About));
        }
    });
    // The picker blocks, so open it outside the input lock.
    if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT)) {
        if let Some(path) = panels::open_file_dialog() {
            events.push(ViewerEvent::FileChosen(path));
        }
    }
    action
}

impl eframe::App for SpectralViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        let blocked = self.state.notice.is_some();

        let mut action = if blocked { None } else { shortcuts(ctx, &mut events) };

        self.sync_texture(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                if let Some(a) = panels::top_bar(ui, &self.state, &mut events) {
                    action = Some(a);
                }
            });
        });

        // ---- Bottom panel: spectral signature ----
        egui::TopBottomPanel::bottom("signature_panel")
            .resizable(true)
            .default_height(280.0)
            .min_height(120.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    ui.heading("Spectral Signature");
                    plot::signature_plot(ui, &self.state);
                });
            });

        // ---- Right side panel: metadata ----
        egui::SidePanel::right("metadata_panel")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    panels::metadata_panel(ui, &self.state);
                });
            });

        // ---- Central panel: band image + band selector ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.heading("Image Analysis Tool");
                egui::TopBottomPanel::bottom("band_selector").show_inside(ui, |ui| {
                    panels::band_selector(ui, &mut self.state, &mut events);
                });
                let texture = self.band_texture.as_ref().map(|t| &t.handle);
                plot::band_image(ui, &self.state, texture, &mut events);
            });
        });

        panels::notice_window(ctx, &self.state, &mut events);
        panels::settings_window(ctx, &self.state, &mut events);
        panels::help_window(ctx, &self.state, &mut events);
        panels::about_window(ctx, &self.state, &mut events);

        // ---- Apply events ----
        let dark_mode = self.state.settings.dark_mode;
        if !events.is_empty() {
            ctx.request_repaint();
        }
        for event in events {
            self.state.handle(event);
        }
        if self.state.settings.dark_mode != dark_mode {
            ctx.set_visuals(self.state.settings.visuals());
        }

        if action == Some(MenuAction::Exit) {
            log::info!("Exit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Event, Key, Modifiers, RawInput};

    use super::*;

    fn command_key(key: Key) -> RawInput {
        RawInput {
            events: vec![Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::COMMAND,
            }],
            modifiers: Modifiers::COMMAND,
            ..Default::default()
        }
    }

    /// Run one frame: shortcuts first, then a band-input style text field.
    /// Returns the shortcut events and whether `key` was left for widgets.
    fn frame(
        ctx: &egui::Context,
        input: RawInput,
        key: Key,
        focus_text: bool,
    ) -> (Vec<ViewerEvent>, bool) {
        let mut events = Vec::new();
        let mut key_left = false;
        let mut text = String::from("12");
        // A discarded pass reruns without input, so only accumulate.
        let _ = ctx.run(input, |ctx| {
            let _ = shortcuts(ctx, &mut events);
            key_left |= ctx.input(|i| {
                i.events
                    .iter()
                    .any(|e| matches!(e, Event::Key { key: k, pressed: true, .. } if *k == key))
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                let response =
                    ui.add(egui::TextEdit::singleline(&mut text).id(egui::Id::new("band_input")));
                if focus_text {
                    response.request_focus();
                }
            });
        });
        (events, key_left)
    }

    #[test]
    fn select_all_in_text_field_does_not_open_about() {
        let ctx = egui::Context::default();
        frame(&ctx, RawInput::default(), Key::A, true);
        frame(&ctx, RawInput::default(), Key::A, true);
        assert!(ctx.wants_keyboard_input());

        let (events, key_left) = frame(&ctx, command_key(Key::A), Key::A, true);
        assert!(events.is_empty(), "unexpected events: {events:?}");
        assert!(key_left);

        let (events, key_left) = frame(&ctx, command_key(Key::H), Key::H, true);
        assert!(events.is_empty(), "unexpected events: {events:?}");
        assert!(key_left);
    }

    #[test]
    fn shortcuts_open_windows_without_text_focus() {
        let ctx = egui::Context::default();
        frame(&ctx, RawInput::default(), Key::A, false);
        assert!(!ctx.wants_keyboard_input());

        let (events, key_left) = frame(&ctx, command_key(Key::A), Key::A, false);
        assert_eq!(events, vec![ViewerEvent::ShowWindow(Window::About)]);
        assert!(!key_left);

        let (events, _) = frame(&ctx, command_key(Key::H), Key::H, false);
        assert_eq!(events, vec![ViewerEvent::ShowWindow(Window::Help)]);
    }

    #[test]
    fn settings_shortcut_works_while_typing() {
        let ctx = egui::Context::default();
        frame(&ctx, RawInput::default(), Key::P, true);
        frame(&ctx, RawInput::default(), Key::P, true);

        let (events, _) = frame(&ctx, command_key(Key::P), Key::P, true);
        assert_eq!(events, vec![ViewerEvent::ShowWindow(Window::Settings)]);
    }
}
