use ndarray::{Array1, ArrayView1};
use ndarray_stats::QuantileExt;
use slog::info;

use crate::analysis::normalize::zscore_in_place;
use crate::log::create_logger;

/// Sample count of the synthetic Normal template, matching the beat window
/// at 360 Hz (72 + 144 samples).
pub const REFERENCE_LEN: usize = 216;

/// The canonical Normal heartbeat, synthesized once at startup and shared
/// immutably by every classification afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTemplate {
    samples: Array1<f64>,
}

impl ReferenceTemplate {
    /// Builds the template as a sum of parametric P/Q/R/S/T components on
    /// normalized time [0, 1], then z-scores it like any segmented beat.
    /// Deterministic: repeated builds are bit-identical.
    pub fn synthesize() -> Self {
        let logger = create_logger("reference".to_string());
        info!(logger, "building synthetic Normal reference");

        let t = Array1::linspace(0.0, 1.0, REFERENCE_LEN);

        let p = gaussian(&t, 0.20, 0.025, 0.10);
        let q = gaussian(&t, 0.38, 0.010, -0.15);
        let r = gaussian(&t, 0.40, 0.008, 1.0);
        let s = gaussian(&t, 0.43, 0.012, -0.25);
        let t_wave = skewed_gaussian(&t, 0.65, 0.050, 0.10, 2.0);

        let mut samples = p + q + r + s + t_wave;
        zscore_in_place(&mut samples);

        info!(logger, "synthetic Normal reference ready"; "len" => samples.len());
        ReferenceTemplate { samples }
    }

    pub fn view(&self) -> ArrayView1<f64> {
        self.samples.view()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn gaussian(t: &Array1<f64>, mu: f64, sigma: f64, amplitude: f64) -> Array1<f64> {
    t.mapv(|x| amplitude * (-((x - mu).powi(2)) / (2.0 * sigma * sigma)).exp())
}

/// Skew-normal-shaped wave `2 * pdf(t) * cdf(skew * (t - mu) / sigma)`,
/// rescaled so its peak hits the target amplitude.
fn skewed_gaussian(t: &Array1<f64>, mu: f64, sigma: f64, amplitude: f64, skew: f64) -> Array1<f64> {
    let norm = 1.0 / (sigma * (2.0 * std::f64::consts::PI).sqrt());

    let shape = t.mapv(|x| {
        let pdf = norm * (-((x - mu).powi(2)) / (2.0 * sigma * sigma)).exp();
        let cdf = 0.5 * (1.0 + erf(skew * (x - mu) / sigma / std::f64::consts::SQRT_2));
        2.0 * pdf * cdf
    });

    let peak = *shape.max().unwrap();
    let scale = amplitude / peak;
    shape.mapv(|x| scale * x)
}

fn erf(x: f64) -> f64 {
    1.0 - erfc(x)
}

/// Complementary error function approximation.
fn erfc(x: f64) -> f64 {
    // Approximation from Abramowitz and Stegun
    let t = 1.0 / (1.0 + 0.5 * x.abs());

    let tau = t
        * (-x * x - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587
                                        + t * (-0.82215223 + t * 0.17087277)))))))))
        .exp();

    if x >= 0.0 {
        tau
    } else {
        2.0 - tau
    }
}
