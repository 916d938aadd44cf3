use std::path::Path;

use ndarray::Array3;
use spectral_viewer::data::writer::{write_mat_file, MatVariable};

const SEED: u64 = 42;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn endmember(bands: usize, peaks: &[(f64, f64, f64)], baseline: f64) -> Vec<f64> {
    (0..bands)
        .map(|b| {
            let x = b as f64;
            baseline
                + peaks
                    .iter()
                    .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
                    .sum::<f64>()
        })
        .collect()
}

/// Sensor noise for one sample, a pure function of its position so the
/// generated file is identical on every run.
fn noise(seed: u64, index: usize, std_dev: f64) -> f64 {
    let bits = mix(seed ^ index as u64);
    // Two 26-bit uniforms out of one hash; the first must stay above zero.
    let u1 = ((bits >> 38) as f64 + 0.5) / (1u64 << 26) as f64;
    let u2 = ((bits >> 12) & ((1 << 26) - 1)) as f64 / (1u64 << 26) as f64;
    std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// splitmix64 finaliser.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn main() -> std::io::Result<()> {
    let (height, width, bands) = (64, 80, 120);

    // Three materials: vegetation-like, soil-like, water-like.
    let materials = [
        endmember(bands, &[(55.0, 6.0, 0.6), (90.0, 15.0, 0.9)], 0.05),
        endmember(bands, &[(70.0, 35.0, 0.5)], 0.15),
        endmember(bands, &[(20.0, 10.0, 0.3)], 0.02),
    ];

    // Abundances vary smoothly across the scene and sum to one.
    let cube = Array3::from_shape_fn((height, width, bands), |(r, c, b)| {
        let u = c as f64 / (width - 1) as f64;
        let v = r as f64 / (height - 1) as f64;
        let weights = [u * (1.0 - v), (1.0 - u) * (1.0 - v), v];
        let signal = weights
            .iter()
            .zip(&materials)
            .map(|(w, m)| w * m[b])
            .sum::<f64>();
        signal + noise(SEED, (r * width + c) * bands + b, 0.005)
    });

    let output_path = Path::new("sample_cube.mat");
    write_mat_file(output_path, &[MatVariable::from_cube("cube", &cube).compressed()])?;

    println!(
        "Wrote a {height} x {width} x {bands} cube to {}",
        output_path.display()
    );
    Ok(())
}
