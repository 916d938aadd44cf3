use thiserror::Error;

// ---------------------------------------------------------------------------
// File loading errors
// ---------------------------------------------------------------------------

/// Reasons a MAT-file cannot be turned into a spectral cube.
///
/// These are surfaced to the user as a recoverable notice; the process and
/// any previously loaded cube are unaffected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no file selected")]
    EmptyPath,

    #[error("not a readable MAT-file: {0}")]
    Parse(String),

    #[error("the file contains no variables")]
    NoVariables,

    #[error("variable '{0}' not found in file")]
    VariableNotFound(String),

    #[error("variable '{name}' has shape {dims:?}, expected height x width x bands")]
    NotThreeDimensional { name: String, dims: Vec<usize> },

    #[error("cube has an empty axis ({height} x {width} x {bands})")]
    EmptyCube {
        height: usize,
        width: usize,
        bands: usize,
    },

    #[error("variable '{name}' holds {actual} values but its shape needs {expected}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

// ---------------------------------------------------------------------------
// Band input errors
// ---------------------------------------------------------------------------

/// Rejected band-index input. The message is shown verbatim in the notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandInputError {
    #[error("Please enter a band value!")]
    Empty,

    #[error(
        "'{input}' is not a band number. Please enter a value between 0 and {last}!",
        last = .band_count.saturating_sub(1)
    )]
    NotANumber { input: String, band_count: usize },

    #[error(
        "Band {value} does not exist. Please enter a value between 0 and {last}!",
        last = .band_count.saturating_sub(1)
    )]
    OutOfRange { value: i64, band_count: usize },
}
