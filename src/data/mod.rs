/// Data layer: cube model, MAT-file loading, and per-band metadata.
///
/// Architecture:
/// ```text
///        .mat
///         │
///         ▼
///   ┌──────────┐
///   │  loader   │  parse container → LoadedFile { Cube, variable, size }
///   └──────────┘
///         │
///         ▼
///   ┌──────────┐
///   │   Cube    │  Array3<f64>: band slices, pixel signatures
///   └──────────┘
///         │
///         ▼
///   ┌──────────┐
///   │ metadata  │  nine table rows, band max/min/mean
///   └──────────┘
/// ```
///
/// `writer` produces MAT-files for sample data and fixtures.

pub mod loader;
pub mod metadata;
pub mod model;
pub mod writer;
