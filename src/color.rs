use eframe::egui::{Color32, ColorImage};
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Cube;

// ---------------------------------------------------------------------------
// Colormaps
// ---------------------------------------------------------------------------

const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

const INFERNO: [[u8; 3]; 9] = [
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 140, 10],
    [249, 201, 50],
    [252, 255, 164],
];

const GRAY: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

/// False-colour maps for the band image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Viridis,
    Inferno,
    Gray,
}

impl Colormap {
    pub const ALL: [Colormap; 3] = [Colormap::Viridis, Colormap::Inferno, Colormap::Gray];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Viridis => "Viridis",
            Colormap::Inferno => "Inferno",
            Colormap::Gray => "Gray",
        }
    }

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Inferno => &INFERNO,
            Colormap::Gray => &GRAY,
        }
    }

    /// Colour at `t ∈ [0, 1]`, interpolated in linear sRGB between stops.
    pub fn sample(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f32;

        let a = to_linear(stops[i]);
        let b = to_linear(stops[i + 1]);
        let rgb: Srgb = Srgb::from_linear(a.mix(b, frac));
        Color32::from_rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }
}

fn to_linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Band raster
// ---------------------------------------------------------------------------

/// Colourise one band, auto-scaled to that band's own value range.
///
/// Row 0 of the cube becomes the top row of the image. A constant band maps
/// to the low end of the colormap; NaN samples are transparent.
pub fn render_band(cube: &Cube, band: usize, colormap: Colormap) -> Option<ColorImage> {
    let slice = cube.band(band)?;

    let (lo, hi) = slice
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;

    let mut rgba = Vec::with_capacity(slice.len() * 4);
    for &v in slice.iter() {
        if v.is_nan() {
            rgba.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let t = if range > 0.0 && range.is_finite() {
            (v - lo) / range
        } else if v.is_finite() {
            0.0
        } else if v > 0.0 {
            1.0
        } else {
            0.0
        };
        rgba.extend_from_slice(&colormap.sample(t).to_array());
    }

    Some(ColorImage::from_rgba_unmultiplied(
        [cube.width(), cube.height()],
        &rgba,
    ))
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    #[test]
    fn sample_hits_end_stops() {
        assert_eq!(Colormap::Gray.sample(0.0), Color32::from_rgb(0, 0, 0));
        assert_eq!(Colormap::Gray.sample(1.0), Color32::from_rgb(255, 255, 255));
        assert_eq!(Colormap::Viridis.sample(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(Colormap::Viridis.sample(1.0), Color32::from_rgb(253, 231, 37));
    }

    #[test]
    fn sample_clamps_out_of_range() {
        assert_eq!(Colormap::Inferno.sample(-3.0), Colormap::Inferno.sample(0.0));
        assert_eq!(Colormap::Inferno.sample(7.0), Colormap::Inferno.sample(1.0));
    }

    #[test]
    fn gray_is_monotonic() {
        let mut last = 0u8;
        for i in 0..=20 {
            let c = Colormap::Gray.sample(i as f64 / 20.0);
            assert!(c.r() >= last);
            last = c.r();
        }
    }

    #[test]
    fn band_raster_is_autoscaled_and_row_major() {
        // 2 rows x 3 columns, one band ranging 10..=15
        let data = Array3::from_shape_vec((2, 3, 1), vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0])
            .unwrap();
        let cube = Cube::new(data).unwrap();
        let image = render_band(&cube, 0, Colormap::Gray).unwrap();

        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], Color32::from_rgb(0, 0, 0));
        assert_eq!(image.pixels[5], Color32::from_rgb(255, 255, 255));
        assert!(image.pixels[1].r() < image.pixels[3].r());
    }

    #[test]
    fn constant_band_maps_to_low_end() {
        let cube = Cube::new(Array3::from_elem((2, 2, 1), 4.2)).unwrap();
        let image = render_band(&cube, 0, Colormap::Viridis).unwrap();
        assert!(image
            .pixels
            .iter()
            .all(|&p| p == Colormap::Viridis.sample(0.0)));
    }

    #[test]
    fn nan_is_transparent() {
        let data = Array3::from_shape_vec((1, 2, 1), vec![f64::NAN, 1.0]).unwrap();
        let image = render_band(&Cube::new(data).unwrap(), 0, Colormap::Gray).unwrap();
        assert_eq!(image.pixels[0], Color32::TRANSPARENT);
    }

    #[test]
    fn missing_band_renders_nothing() {
        let cube = Cube::new(Array3::zeros((2, 2, 2))).unwrap();
        assert!(render_band(&cube, 2, Colormap::Gray).is_none());
    }
}
