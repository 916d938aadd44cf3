use std::path::PathBuf;

use eframe::egui::ColorImage;

use crate::color::{render_band, Colormap};
use crate::config::ViewerSettings;
use crate::data::loader::{load_file, LoadedFile, VariableSelection};
use crate::data::metadata::Metadata;
use crate::data::model::{parse_band, Cube, Pixel};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Auxiliary windows reachable from the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Settings,
    Help,
    About,
}

/// Everything the UI can ask of the viewer. Widgets emit these; only
/// [`AppState::handle`] changes state in response.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A path came back from the file picker.
    FileChosen(PathBuf),
    /// Reload the current file from a different variable.
    VariableSelected(String),
    /// The band field was submitted (button or Enter).
    BandSubmitted(String),
    /// The band image was clicked at this plot-space point.
    PixelClicked { x: f64, y: f64 },
    DismissNotice,
    ShowWindow(Window),
    CloseWindow(Window),
    SetColormap(Colormap),
    SetDarkMode(bool),
}

/// A blocking message shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Session – everything tied to the currently open file
// ---------------------------------------------------------------------------

pub struct Session {
    pub path: PathBuf,
    pub file_size: u64,
    pub variable: String,
    /// 3-D variables available in the file.
    pub variables: Vec<String>,
    pub cube: Cube,
    /// Currently displayed band, always `< cube.bands()`.
    pub band: usize,
    pub metadata: Metadata,
    /// Colourised current band.
    pub raster: ColorImage,
    pub selected: Option<Pixel>,
    pub signature: Option<Vec<f64>>,
}

impl Session {
    fn open(loaded: LoadedFile, colormap: Colormap) -> Option<Self> {
        let LoadedFile {
            path,
            file_size,
            variable,
            variables,
            cube,
        } = loaded;
        let metadata = Metadata::compute(&path, file_size, &variable, &cube, 0)?;
        let raster = render_band(&cube, 0, colormap)?;
        Some(Self {
            path,
            file_size,
            variable,
            variables,
            cube,
            band: 0,
            metadata,
            raster,
            selected: None,
            signature: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Open file, `None` until one loads.
    pub session: Option<Session>,

    /// Text in the band field.
    pub band_input: String,

    pub settings: ViewerSettings,

    /// Blocking notice; while set, the rest of the UI is disabled.
    pub notice: Option<Notice>,

    pub show_settings: bool,
    pub show_help: bool,
    pub show_about: bool,

    /// Bumped whenever `session.raster` is replaced.
    pub render_generation: u64,

    /// Bumped on every successful load, so plots reset their view.
    pub load_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            band_input: String::new(),
            settings: ViewerSettings::default(),
            notice: None,
            show_settings: false,
            show_help: false,
            show_about: false,
            render_generation: 0,
            load_count: 0,
        }
    }
}

impl AppState {
    /// Dispatch one UI event to its handler.
    pub fn handle(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::FileChosen(path) => self.open_file(path, VariableSelection::First),
            ViewerEvent::VariableSelected(name) => self.select_variable(name),
            ViewerEvent::BandSubmitted(input) => self.submit_band(&input),
            ViewerEvent::PixelClicked { x, y } => self.click_pixel(x, y),
            ViewerEvent::DismissNotice => self.notice = None,
            ViewerEvent::ShowWindow(window) => self.set_window(window, true),
            ViewerEvent::CloseWindow(window) => self.set_window(window, false),
            ViewerEvent::SetColormap(colormap) => self.set_colormap(colormap),
            ViewerEvent::SetDarkMode(dark) => self.settings.dark_mode = dark,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Load `path` and replace the current session. On failure the previous
    /// session is kept and a notice explains why.
    pub fn open_file(&mut self, path: PathBuf, selection: VariableSelection) {
        let loaded = match load_file(&path, &selection) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.notify("Failed to load", format!("{e:#}"));
                return;
            }
        };

        log::info!(
            "Loaded '{}' from {} ({} x {} x {})",
            loaded.variable,
            path.display(),
            loaded.cube.height(),
            loaded.cube.width(),
            loaded.cube.bands()
        );

        match Session::open(loaded, self.settings.colormap) {
            Some(session) => {
                self.session = Some(session);
                self.band_input.clear();
                self.render_generation += 1;
                self.load_count += 1;
            }
            None => self.notify("Failed to load", "the cube has no bands".to_string()),
        }
    }

    fn select_variable(&mut self, name: String) {
        let Some(session) = &self.session else {
            return;
        };
        if session.variable == name {
            return;
        }
        let path = session.path.clone();
        self.open_file(path, VariableSelection::Named(name));
    }

    /// Validate the band field and switch bands. Invalid input leaves every
    /// piece of state untouched apart from raising a notice.
    pub fn submit_band(&mut self, input: &str) {
        let Some(session) = &mut self.session else {
            log::debug!("band submitted with no file open");
            return;
        };

        let band = match parse_band(input, session.cube.bands()) {
            Ok(band) => band,
            Err(e) => {
                log::warn!("Rejected band input {input:?}: {e}");
                self.notify("Invalid band", e.to_string());
                return;
            }
        };

        let (Some(metadata), Some(raster)) = (
            Metadata::compute(
                &session.path,
                session.file_size,
                &session.variable,
                &session.cube,
                band,
            ),
            render_band(&session.cube, band, self.settings.colormap),
        ) else {
            return;
        };

        session.band = band;
        session.metadata = metadata;
        session.raster = raster;
        self.render_generation += 1;
        log::info!("Showing band {band}");
    }

    /// Extract the spectral signature under a click. Clicks outside the
    /// image do nothing.
    pub fn click_pixel(&mut self, plot_x: f64, plot_y: f64) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(pixel) = session.cube.pixel_at(plot_x, plot_y) else {
            log::debug!("Ignoring click outside image at ({plot_x:.2}, {plot_y:.2})");
            return;
        };
        session.signature = session.cube.signature(pixel);
        session.selected = Some(pixel);
    }

    fn set_colormap(&mut self, colormap: Colormap) {
        self.settings.colormap = colormap;
        if let Some(session) = &mut self.session {
            if let Some(raster) = render_band(&session.cube, session.band, colormap) {
                session.raster = raster;
                self.render_generation += 1;
            }
        }
    }

    fn set_window(&mut self, window: Window, open: bool) {
        match window {
            Window::Settings => self.show_settings = open,
            Window::Help => self.show_help = open,
            Window::About => self.show_about = open,
        }
    }

    fn notify(&mut self, title: &str, message: String) {
        self.notice = Some(Notice {
            title: title.to_string(),
            message,
        });
    }
}
