use ndarray::{s, Array1, ArrayView1};

/// A fiducial annotation: the sample index of a recognizable feature of a
/// heartbeat (the R-peak) plus its annotation symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fiducial {
    pub index: usize,
    pub label: String,
}

/// One fixed-length heartbeat window cut around a fiducial, carrying the
/// annotation symbol it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Beat {
    pub samples: Array1<f64>,
    pub label: String,
}

/// Cuts `[index - pre, index + post)` windows out of the filtered signal,
/// one per fiducial, in fiducial order. Windows that would cross a signal
/// boundary are skipped entirely; no partial beats are ever produced.
pub fn segment(
    signal: ArrayView1<f64>,
    fiducials: &[Fiducial],
    pre: usize,
    post: usize,
) -> Vec<Beat> {
    fiducials
        .iter()
        .filter_map(|fiducial| {
            let start = fiducial.index.checked_sub(pre)?;
            let end = fiducial.index + post;
            if end > signal.len() {
                return None;
            }

            Some(Beat {
                samples: signal.slice(s![start..end]).to_owned(),
                label: fiducial.label.clone(),
            })
        })
        .collect()
}
