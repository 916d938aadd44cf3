use std::io::{self, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use ndarray::Array3;

// ---------------------------------------------------------------------------
// Minimal MAT-file (Level 5) writer
// ---------------------------------------------------------------------------
//
// Real numeric matrices only, optionally zlib-compressed (v7 style). Enough
// for sample cubes and fixtures; reading goes through `matfile`.

const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT16: u32 = 3;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_SINGLE: u32 = 7;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;
const MI_COMPRESSED: u32 = 15;

const HEADER_TEXT_LEN: usize = 116;

/// Storage class of a written variable. Values are cast from `f64` on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatClass {
    #[default]
    Double,
    Single,
    Int16,
    UInt16,
    UInt8,
}

impl MatClass {
    /// (mxCLASS code, miTYPE of the stored elements)
    fn codes(self) -> (u32, u32) {
        match self {
            MatClass::Double => (6, MI_DOUBLE),
            MatClass::Single => (7, MI_SINGLE),
            MatClass::Int16 => (10, MI_INT16),
            MatClass::UInt16 => (11, MI_UINT16),
            MatClass::UInt8 => (9, MI_UINT8),
        }
    }

    fn encode(self, values: &[f64]) -> Vec<u8> {
        match self {
            MatClass::Double => values.iter().flat_map(|v| v.to_le_bytes()).collect(),
            MatClass::Single => values.iter().flat_map(|&v| (v as f32).to_le_bytes()).collect(),
            MatClass::Int16 => values.iter().flat_map(|&v| (v as i16).to_le_bytes()).collect(),
            MatClass::UInt16 => values.iter().flat_map(|&v| (v as u16).to_le_bytes()).collect(),
            MatClass::UInt8 => values.iter().map(|&v| v as u8).collect(),
        }
    }
}

/// One named numeric variable, values in MATLAB column-major order.
#[derive(Debug, Clone)]
pub struct MatVariable {
    pub name: String,
    pub dims: Vec<usize>,
    pub data: Vec<f64>,
    pub class: MatClass,
    /// Wrap the matrix in a zlib-compressed element.
    pub compressed: bool,
}

impl MatVariable {
    pub fn new(name: &str, dims: Vec<usize>, data: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            dims,
            data,
            class: MatClass::Double,
            compressed: false,
        }
    }

    /// Wrap a height × width × bands cube, reordering to column-major.
    pub fn from_cube(name: &str, cube: &Array3<f64>) -> Self {
        let (height, width, bands) = cube.dim();
        // Iterating the transposed view walks the first axis fastest.
        let data = cube.t().iter().copied().collect();
        Self::new(name, vec![height, width, bands], data)
    }

    pub fn with_class(mut self, class: MatClass) -> Self {
        self.class = class;
        self
    }

    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }
}

/// Write `variables` to `path`, in order, as a Level-5 MAT-file.
pub fn write_mat_file(path: &Path, variables: &[MatVariable]) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_mat(io::BufWriter::new(file), variables)
}

pub fn write_mat<W: Write>(mut out: W, variables: &[MatVariable]) -> io::Result<()> {
    out.write_all(&header())?;
    for var in variables {
        let element = encode_matrix(var)?;
        if var.compressed {
            out.write_all(&compress(&element)?)?;
        } else {
            out.write_all(&element)?;
        }
    }
    out.flush()
}

fn header() -> [u8; 128] {
    let mut header = [b' '; 128];
    let text = format!(
        "MATLAB 5.0 MAT-file, Platform: {}, Created by: spectral-viewer",
        std::env::consts::OS
    );
    let n = text.len().min(HEADER_TEXT_LEN);
    header[..n].copy_from_slice(&text.as_bytes()[..n]);
    header[116..124].fill(0);
    header[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
    header[126..128].copy_from_slice(b"IM");
    header
}

fn encode_matrix(var: &MatVariable) -> io::Result<Vec<u8>> {
    let expected: usize = var.dims.iter().product();
    if expected != var.data.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "variable '{}' has {} values for shape {:?}",
                var.name,
                var.data.len(),
                var.dims
            ),
        ));
    }

    let (class_code, data_type) = var.class.codes();
    let mut body = Vec::new();

    let flags: Vec<u8> = [class_code, 0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    push_element(&mut body, MI_UINT32, &flags);

    let mut dims = Vec::with_capacity(var.dims.len() * 4);
    for &d in &var.dims {
        let d = i32::try_from(d).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "dimension exceeds i32 range")
        })?;
        dims.extend_from_slice(&d.to_le_bytes());
    }
    push_element(&mut body, MI_INT32, &dims);

    push_element(&mut body, MI_INT8, var.name.as_bytes());

    push_element(&mut body, data_type, &var.class.encode(&var.data));

    let mut element = Vec::with_capacity(8 + body.len());
    element.extend_from_slice(&MI_MATRIX.to_le_bytes());
    element.extend_from_slice(&(body.len() as u32).to_le_bytes());
    element.extend_from_slice(&body);
    Ok(element)
}

/// A complete matrix element deflated into an unpadded miCOMPRESSED element.
fn compress(element: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(element)?;
    let deflated = encoder.finish()?;

    let mut out = Vec::with_capacity(8 + deflated.len());
    out.extend_from_slice(&MI_COMPRESSED.to_le_bytes());
    out.extend_from_slice(&(deflated.len() as u32).to_le_bytes());
    out.extend_from_slice(&deflated);
    Ok(out)
}

/// Tag + payload, padded to the next 8-byte boundary.
fn push_element(buf: &mut Vec<u8>, data_type: u32, payload: &[u8]) {
    buf.extend_from_slice(&data_type.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(payload);
    let padding = (8 - payload.len() % 8) % 8;
    buf.extend(std::iter::repeat(0u8).take(padding));
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::ZlibDecoder;

    use super::*;

    #[test]
    fn cube_is_stored_column_major() {
        let cube = Array3::from_shape_fn((2, 2, 2), |(r, c, b)| (r + 10 * c + 100 * b) as f64);
        let var = MatVariable::from_cube("cube", &cube);
        assert_eq!(var.dims, vec![2, 2, 2]);
        assert_eq!(
            var.data,
            vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0]
        );
    }

    #[test]
    fn elements_are_eight_byte_aligned() {
        let var = MatVariable::new("abc", vec![1, 1, 1], vec![2.5]);
        let mut buf = Vec::new();
        write_mat(&mut buf, &[var]).unwrap();

        assert_eq!(&buf[126..128], b"IM");
        // flags 16 + dims (8 + 16) + name (8 + 8) + data (8 + 8)
        let body_len = u32::from_le_bytes(buf[132..136].try_into().unwrap());
        assert_eq!(body_len, 72);
        assert_eq!(buf.len(), 128 + 8 + 72);
    }

    #[test]
    fn uint16_class_is_tagged_and_narrowed() {
        let var = MatVariable::new("u", vec![1, 3], vec![1.0, 300.0, 65535.0])
            .with_class(MatClass::UInt16);
        let mut buf = Vec::new();
        write_mat(&mut buf, &[var]).unwrap();

        let element = &buf[128..];
        // array flags payload starts after matrix tag (8) and flags tag (8)
        assert_eq!(u32::from_le_bytes(element[16..20].try_into().unwrap()), 11);
        // flags 16 + dims 16 + name 16, then the data tag
        let data_tag = &element[8 + 48..8 + 56];
        assert_eq!(u32::from_le_bytes(data_tag[0..4].try_into().unwrap()), MI_UINT16);
        assert_eq!(u32::from_le_bytes(data_tag[4..8].try_into().unwrap()), 6);
        assert_eq!(&element[8 + 56..8 + 62], &[1, 0, 44, 1, 255, 255]);
    }

    #[test]
    fn compressed_element_inflates_to_plain_element() {
        let var = MatVariable::new("z", vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let plain = encode_matrix(&var).unwrap();

        let mut buf = Vec::new();
        write_mat(&mut buf, &[var.compressed()]).unwrap();
        let element = &buf[128..];
        assert_eq!(u32::from_le_bytes(element[0..4].try_into().unwrap()), MI_COMPRESSED);
        let len = u32::from_le_bytes(element[4..8].try_into().unwrap()) as usize;
        assert_eq!(element.len(), 8 + len);

        let mut inflated = Vec::new();
        ZlibDecoder::new(&element[8..]).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, plain);
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let var = MatVariable::new("bad", vec![2, 2, 2], vec![0.0; 7]);
        let err = write_mat(Vec::new(), &[var]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
