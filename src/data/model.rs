use ndarray::{s, Array3, ArrayView2, Axis};

use crate::error::{BandInputError, LoadError};

// ---------------------------------------------------------------------------
// Pixel – a cell of the band image
// ---------------------------------------------------------------------------

/// A pixel position in the cube: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

/// Map a point in plot space to the pixel underneath it.
///
/// The band image is laid out with column `c` covering `x ∈ [c, c + 1)` and
/// row `r` covering `y ∈ (height - r - 1, height - r]`, so row 0 sits at the
/// top like a raster. Points outside the image, including its outer edges,
/// map to `None`.
pub fn pixel_at(plot_x: f64, plot_y: f64, width: usize, height: usize) -> Option<Pixel> {
    if !plot_x.is_finite() || !plot_y.is_finite() {
        return None;
    }
    let col = plot_x.floor();
    let row = (height as f64 - plot_y).floor();
    if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
        return None;
    }
    Some(Pixel {
        x: col as usize,
        y: row as usize,
    })
}

/// Validate free-text band input against the number of bands in the cube.
pub fn parse_band(input: &str, band_count: usize) -> Result<usize, BandInputError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(BandInputError::Empty);
    }
    let value: i64 = text.parse().map_err(|_| BandInputError::NotANumber {
        input: text.to_string(),
        band_count,
    })?;
    match usize::try_from(value) {
        Ok(band) if band < band_count => Ok(band),
        _ => Err(BandInputError::OutOfRange { value, band_count }),
    }
}

// ---------------------------------------------------------------------------
// Cube – the loaded height × width × bands array
// ---------------------------------------------------------------------------

/// A spectral image cube with axes (row, column, band).
///
/// All three extents are non-zero, so every band has at least one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    data: Array3<f64>,
}

impl Cube {
    pub fn new(data: Array3<f64>) -> Result<Self, LoadError> {
        let (height, width, bands) = data.dim();
        if height == 0 || width == 0 || bands == 0 {
            return Err(LoadError::EmptyCube {
                height,
                width,
                bands,
            });
        }
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn bands(&self) -> usize {
        self.data.dim().2
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// The 2-D slice at `band`, or `None` past the last band.
    pub fn band(&self, band: usize) -> Option<ArrayView2<'_, f64>> {
        (band < self.bands()).then(|| self.data.index_axis(Axis(2), band))
    }

    pub fn contains(&self, pixel: Pixel) -> bool {
        pixel.y < self.height() && pixel.x < self.width()
    }

    /// Pixel under a plot-space point, see [`pixel_at`].
    pub fn pixel_at(&self, plot_x: f64, plot_y: f64) -> Option<Pixel> {
        pixel_at(plot_x, plot_y, self.width(), self.height())
    }

    /// Intensities at `pixel` across every band, in band order.
    pub fn signature(&self, pixel: Pixel) -> Option<Vec<f64>> {
        if !self.contains(pixel) {
            return None;
        }
        Some(self.data.slice(s![pixel.y, pixel.x, ..]).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    fn ramp_cube(height: usize, width: usize, bands: usize) -> Cube {
        let data = Array3::from_shape_fn((height, width, bands), |(r, c, b)| {
            (r * 100 + c * 10 + b) as f64
        });
        Cube::new(data).unwrap()
    }

    #[test]
    fn dimensions_follow_array_axes() {
        let cube = ramp_cube(4, 3, 7);
        assert_eq!((cube.height(), cube.width(), cube.bands()), (4, 3, 7));
    }

    #[test]
    fn empty_axis_is_rejected() {
        let err = Cube::new(Array3::zeros((2, 0, 3))).unwrap_err();
        assert!(matches!(err, LoadError::EmptyCube { width: 0, .. }));
    }

    #[test]
    fn band_slice_is_bounded() {
        let cube = ramp_cube(2, 2, 3);
        assert_eq!(cube.band(2).unwrap()[[1, 0]], 102.0);
        assert!(cube.band(3).is_none());
    }

    #[test]
    fn signature_reads_every_band_at_row_and_column() {
        let cube = ramp_cube(3, 5, 6);
        let sig = cube.signature(Pixel { x: 4, y: 1 }).unwrap();
        assert_eq!(sig.len(), 6);
        for (i, v) in sig.iter().enumerate() {
            assert_eq!(*v, cube.data()[[1, 4, i]]);
        }
    }

    #[test]
    fn signature_outside_cube_is_none() {
        let cube = ramp_cube(3, 5, 6);
        assert!(cube.signature(Pixel { x: 5, y: 0 }).is_none());
        assert!(cube.signature(Pixel { x: 0, y: 3 }).is_none());
    }

    #[test]
    fn plot_points_map_to_raster_pixels() {
        // 4 wide, 3 tall: row 0 occupies y in (2, 3].
        assert_eq!(pixel_at(0.2, 2.9, 4, 3), Some(Pixel { x: 0, y: 0 }));
        assert_eq!(pixel_at(3.99, 0.01, 4, 3), Some(Pixel { x: 3, y: 2 }));
        assert_eq!(pixel_at(1.5, 1.5, 4, 3), Some(Pixel { x: 1, y: 1 }));
    }

    #[test]
    fn plot_points_outside_image_map_to_nothing() {
        assert_eq!(pixel_at(-0.1, 1.0, 4, 3), None);
        assert_eq!(pixel_at(4.0, 1.0, 4, 3), None);
        assert_eq!(pixel_at(1.0, 0.0, 4, 3), None);
        assert_eq!(pixel_at(1.0, 3.5, 4, 3), None);
        assert_eq!(pixel_at(f64::NAN, 1.0, 4, 3), None);
    }

    #[test]
    fn band_input_accepts_valid_range() {
        assert_eq!(parse_band("0", 5), Ok(0));
        assert_eq!(parse_band(" 4 ", 5), Ok(4));
    }

    #[test]
    fn band_input_rejects_empty_and_garbage() {
        assert_eq!(parse_band("", 5), Err(BandInputError::Empty));
        assert_eq!(parse_band("   ", 5), Err(BandInputError::Empty));
        assert!(matches!(
            parse_band("abc", 5),
            Err(BandInputError::NotANumber { band_count: 5, .. })
        ));
    }

    #[test]
    fn band_input_one_past_last_cites_range() {
        let err = parse_band("5", 5).unwrap_err();
        assert_eq!(
            err,
            BandInputError::OutOfRange {
                value: 5,
                band_count: 5
            }
        );
        assert_eq!(
            err.to_string(),
            "Band 5 does not exist. Please enter a value between 0 and 4!"
        );
        assert_eq!(
            parse_band("x1", 5).unwrap_err().to_string(),
            "'x1' is not a band number. Please enter a value between 0 and 4!"
        );
        assert!(matches!(
            parse_band("-1", 5),
            Err(BandInputError::OutOfRange { value: -1, .. })
        ));
    }
}
