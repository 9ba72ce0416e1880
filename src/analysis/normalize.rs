use ndarray::Array1;

use crate::analysis::segment::Beat;

/// Z-scores every beat independently, in place.
pub fn normalize_beats(beats: &mut [Beat]) {
    for beat in beats.iter_mut() {
        zscore_in_place(&mut beat.samples);
    }
}

/// `(x - mean(x)) / std(x)` with population std. A zero std (constant
/// input) is substituted by 1.0, leaving an all-zero result rather than
/// failing; that is the documented policy for degenerate beats.
pub fn zscore_in_place(data: &mut Array1<f64>) {
    let mean = data.mean().unwrap_or(0.0);
    let mut std = data.std(0.0);
    if std == 0.0 {
        std = 1.0;
    }

    data.mapv_inplace(|x| (x - mean) / std);
}
