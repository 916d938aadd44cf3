use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use matfile::{MatFile, NumericData};
use ndarray::{Array3, ShapeBuilder};

use super::model::Cube;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Variable policy
// ---------------------------------------------------------------------------

/// Which variable of the container holds the cube.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VariableSelection {
    /// The first variable stored in the file. Readers that prepend the
    /// `__header__`, `__version__` and `__globals__` entries put it at key
    /// index 3. Files that store something else first will not load.
    #[default]
    First,
    /// An explicitly chosen variable.
    Named(String),
}

/// A cube together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Raw size on disk in bytes.
    pub file_size: u64,
    /// Name of the variable the cube was read from.
    pub variable: String,
    /// Every 3-D variable in the file, in storage order.
    pub variables: Vec<String>,
    pub cube: Cube,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a spectral cube from a MAT-file (Level 5, optionally compressed).
pub fn load_file(path: &Path, selection: &VariableSelection) -> Result<LoadedFile> {
    if path.as_os_str().is_empty() {
        bail!(LoadError::EmptyPath);
    }

    let file_size = std::fs::metadata(path)
        .with_context(|| format!("reading size of {}", path.display()))?
        .len();

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mat = MatFile::parse(BufReader::new(file))
        .map_err(|e| LoadError::Parse(format!("{e:?}")))
        .with_context(|| format!("parsing {}", path.display()))?;

    let array = match selection {
        VariableSelection::First => mat.arrays().first().ok_or(LoadError::NoVariables)?,
        VariableSelection::Named(name) => mat
            .find_by_name(name)
            .ok_or_else(|| LoadError::VariableNotFound(name.clone()))?,
    };

    let cube = cube_from_array(array)?;
    let variables = mat
        .arrays()
        .iter()
        .filter(|a| a.size().len() == 3)
        .map(|a| a.name().to_string())
        .collect();

    Ok(LoadedFile {
        path: path.to_path_buf(),
        file_size,
        variable: array.name().to_string(),
        variables,
        cube,
    })
}

// ---------------------------------------------------------------------------
// MAT array → Cube
// ---------------------------------------------------------------------------

fn cube_from_array(array: &matfile::Array) -> Result<Cube, LoadError> {
    let name = array.name();
    let dims = array.size();
    let &[height, width, bands] = &dims[..] else {
        return Err(LoadError::NotThreeDimensional {
            name: name.to_string(),
            dims: dims.to_vec(),
        });
    };

    let values = widen_real(name, array.data());
    let actual = values.len();
    let mismatch = |expected| LoadError::ShapeMismatch {
        name: name.to_string(),
        expected,
        actual,
    };
    let expected = element_count(height, width, bands).ok_or_else(|| mismatch(usize::MAX))?;
    if actual != expected {
        return Err(mismatch(expected));
    }

    // MATLAB stores arrays column-major.
    let data = Array3::from_shape_vec((height, width, bands).f(), values).map_err(|_| mismatch(expected))?;
    Cube::new(data)
}

/// Number of samples a cube of this shape holds, `None` if it overflows.
fn element_count(height: usize, width: usize, bands: usize) -> Option<usize> {
    height.checked_mul(width)?.checked_mul(bands)
}

/// Widen any numeric class to `f64`. Complex data keeps its real part.
fn widen_real(name: &str, data: &NumericData) -> Vec<f64> {
    macro_rules! widen {
        ($real:expr, $imag:expr) => {{
            if $imag.is_some() {
                log::warn!("variable '{}' is complex; showing the real part", name);
            }
            $real.iter().map(|&v| v as f64).collect()
        }};
    }

    match data {
        NumericData::Int8 { real, imag } => widen!(real, imag),
        NumericData::UInt8 { real, imag } => widen!(real, imag),
        NumericData::Int16 { real, imag } => widen!(real, imag),
        NumericData::UInt16 { real, imag } => widen!(real, imag),
        NumericData::Int32 { real, imag } => widen!(real, imag),
        NumericData::UInt32 { real, imag } => widen!(real, imag),
        NumericData::Int64 { real, imag } => widen!(real, imag),
        NumericData::UInt64 { real, imag } => widen!(real, imag),
        NumericData::Single { real, imag } => widen!(real, imag),
        NumericData::Double { real, imag } => widen!(real, imag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_multiplies_extents() {
        assert_eq!(element_count(64, 80, 120), Some(614_400));
        assert_eq!(element_count(3, 0, 7), Some(0));
    }

    #[test]
    fn overflowing_header_dims_have_no_count() {
        assert_eq!(element_count(usize::MAX, 2, 1), None);
        assert_eq!(element_count(usize::MAX / 4 + 1, 2, 2), None);
    }
}
