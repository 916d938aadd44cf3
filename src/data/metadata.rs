use std::path::Path;

use super::model::Cube;

// ---------------------------------------------------------------------------
// Human-readable file size
// ---------------------------------------------------------------------------

const SIZE_UNITS: [&str; 5] = ["bytes", "KiB", "MiB", "GiB", "TiB"];

/// Format a byte count with one decimal, stepping through binary units until
/// the value drops below 1024. Anything past 1024 TiB stays in TiB.
pub fn format_file_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

// ---------------------------------------------------------------------------
// Per-band statistics
// ---------------------------------------------------------------------------

/// Max / min / mean of one band, NaN samples skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl BandStats {
    /// Reduce the full 2-D slice at `band`. `None` when the band is out of range.
    pub fn of(cube: &Cube, band: usize) -> Option<Self> {
        let slice = cube.band(band)?;

        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in slice.iter().filter(|v| !v.is_nan()) {
            max = max.max(v);
            min = min.min(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            return Some(Self {
                max: f64::NAN,
                min: f64::NAN,
                mean: f64::NAN,
            });
        }
        Some(Self {
            max,
            min,
            mean: sum / count as f64,
        })
    }
}

// ---------------------------------------------------------------------------
// Metadata snapshot – the nine rows of the metadata table
// ---------------------------------------------------------------------------

pub const ROW_LABELS: [&str; 9] = [
    "Filename",
    "File Size",
    "Data",
    "Height",
    "Width",
    "No: of Bands",
    "Max. Intensity of Current Band",
    "Min. Intensity of Current Band",
    "Avg. Intensity of Current Band",
];

/// Everything the metadata table shows for one file and one band.
///
/// Always rebuilt from scratch; nothing is carried over between bands.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub filename: String,
    pub file_size: u64,
    pub variable: String,
    pub height: usize,
    pub width: usize,
    pub bands: usize,
    pub band: usize,
    pub stats: BandStats,
}

impl Metadata {
    pub fn compute(
        path: &Path,
        file_size: u64,
        variable: &str,
        cube: &Cube,
        band: usize,
    ) -> Option<Self> {
        let stats = BandStats::of(cube, band)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Some(Self {
            filename,
            file_size,
            variable: variable.to_string(),
            height: cube.height(),
            width: cube.width(),
            bands: cube.bands(),
            band,
            stats,
        })
    }

    /// Label / value pairs in table order.
    pub fn rows(&self) -> [(&'static str, String); 9] {
        let values = [
            self.filename.clone(),
            format_file_size(self.file_size),
            self.variable.clone(),
            self.height.to_string(),
            self.width.to_string(),
            self.bands.to_string(),
            format_intensity(self.stats.max),
            format_intensity(self.stats.min),
            format_intensity(self.stats.mean),
        ];
        let mut values = values.into_iter();
        ROW_LABELS.map(|label| (label, values.next().unwrap_or_default()))
    }

    /// Table rows before any file is open.
    pub fn empty_rows() -> [(&'static str, String); 9] {
        ROW_LABELS.map(|label| (label, String::new()))
    }
}

/// Samples are widened to doubles, so whole numbers keep their `.0`.
fn format_intensity(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:?}")
    }
}
