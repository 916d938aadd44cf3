use eframe::egui::{self, Color32, TextureHandle, Ui};
use egui_plot::{Line, Plot, PlotImage, PlotPoint, PlotPoints, Points};

use crate::state::{AppState, ViewerEvent};

// ---------------------------------------------------------------------------
// Band image (pan/zoom, click for signature)
// ---------------------------------------------------------------------------

/// Render the current band and report clicks in plot coordinates.
pub fn band_image(
    ui: &mut Ui,
    state: &AppState,
    texture: Option<&TextureHandle>,
    events: &mut Vec<ViewerEvent>,
) {
    let (Some(session), Some(texture)) = (&state.session, texture) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view a band  (File → Open…)");
        });
        return;
    };

    let width = session.cube.width() as f64;
    let height = session.cube.height() as f64;
    let selected = session.selected;

    let plot_resp = Plot::new(("band_image", state.load_count))
        .data_aspect(1.0)
        .include_x(0.0)
        .include_x(width)
        .include_y(0.0)
        .include_y(height)
        .x_axis_label("Column")
        .y_axis_label("Row")
        // Rows count down from the top edge.
        .y_axis_formatter(move |mark, _range| format!("{}", height - mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture,
                PlotPoint::new(width / 2.0, height / 2.0),
                [width as f32, height as f32],
            ));

            if let Some(pixel) = selected {
                let marker = [pixel.x as f64 + 0.5, height - pixel.y as f64 - 0.5];
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![marker]))
                        .radius(4.0)
                        .color(Color32::RED),
                );
            }
        });

    if plot_resp.response.clicked() {
        if let Some(pos) = plot_resp.response.interact_pointer_pos() {
            let coord = plot_resp.transform.value_from_position(pos);
            events.push(ViewerEvent::PixelClicked {
                x: coord.x,
                y: coord.y,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Spectral signature
// ---------------------------------------------------------------------------

/// Line plot of the signature at the last clicked pixel.
pub fn signature_plot(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No file loaded.");
        });
        return;
    };

    let bands = session.cube.bands() as f64;
    let line = match (session.selected, &session.signature) {
        (Some(pixel), Some(signature)) => {
            let points: PlotPoints = signature
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, v])
                .collect();
            Some(
                Line::new(points)
                    .name(format!("pixel ({}, {})", pixel.x, pixel.y))
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            )
        }
        _ => None,
    };

    if line.is_none() {
        ui.label("Click a pixel in the band image to plot its spectral signature.");
    }

    // Keyed on the pixel too, so a new click resets the view like a fresh plot.
    let id = egui::Id::new(("signature", state.load_count, session.selected));
    Plot::new(id)
        .legend(egui_plot::Legend::default())
        .x_axis_label("Band")
        .y_axis_label("Intensity")
        .include_x(0.0)
        .include_x(bands)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(line) = line {
                plot_ui.line(line);
            }
        });
}
