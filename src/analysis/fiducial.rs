use find_peaks::PeakFinder;
use ndarray::ArrayView1;

use crate::analysis::segment::Fiducial;

/// Constraints for R-peak detection on the cleaned signal. Defaults assume
/// a z-scored filtered ECG: the R wave dominates everything else by a wide
/// margin, and two beats cannot be closer than 200 ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RPeakParameters {
    pub min_prominence: f64,
    pub min_height: f64,
    pub min_distance: usize,
}

impl RPeakParameters {
    pub fn for_sampling_rate(fs: f64) -> Self {
        RPeakParameters {
            min_prominence: 0.5,
            min_height: 0.5,
            min_distance: (0.2 * fs).round() as usize,
        }
    }
}

/// Finds R-peaks in a filtered signal, for records that carry no external
/// annotations. Returns fiducials in sample order, labelled "R".
pub fn detect_r_peaks(signal: ArrayView1<f64>, params: &RPeakParameters) -> Vec<Fiducial> {
    let slice: &[f64] = signal.as_slice().unwrap();
    let peaks = PeakFinder::new(slice)
        .with_min_prominence(params.min_prominence)
        .with_min_height(params.min_height)
        .with_min_distance(params.min_distance)
        .find_peaks();

    let mut indices: Vec<usize> = peaks.iter().map(|p| p.position.start).collect();
    indices.sort_unstable();

    indices
        .into_iter()
        .map(|index| Fiducial {
            index,
            label: "R".to_string(),
        })
        .collect()
}
