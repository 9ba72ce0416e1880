use ndarray::{Array2, ArrayView1};

use crate::analysis::dtw;
use crate::analysis::error::AnalysisError;

/// Decision threshold on the DTW distance, calibrated against MIT-BIH
/// records. Tunable per deployment; it is not a learned value.
pub const DEFAULT_THRESHOLD: f64 = 67.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Normal,
    Abnormal,
}

/// Classification outcome plus the full alignment data, so a downstream
/// visualization layer can render the cost matrix and warping path without
/// recomputing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub distance: f64,
    pub confidence: f64,
    pub cost_matrix: Array2<f64>,
    pub warping_path: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    pub threshold: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Classifier {
    pub fn new(threshold: f64) -> Self {
        Classifier { threshold }
    }

    /// Compares one normalized beat against the Normal reference template
    /// (pass `template.view()`). A distance below the threshold reads
    /// Normal; at or above it reads Abnormal. Confidence is the relative
    /// margin to the threshold, in percent.
    pub fn classify(
        &self,
        beat: ArrayView1<f64>,
        reference: ArrayView1<f64>,
    ) -> Result<Classification, AnalysisError> {
        if !(self.threshold > 0.0) {
            return Err(AnalysisError::InvalidThreshold(self.threshold));
        }

        let dtw = dtw::compute(beat, reference)?;

        let label = if dtw.distance < self.threshold {
            Label::Normal
        } else {
            Label::Abnormal
        };
        let confidence = (dtw.distance - self.threshold).abs() / self.threshold * 100.0;

        Ok(Classification {
            label,
            distance: dtw.distance,
            confidence,
            cost_matrix: dtw.cost_matrix,
            warping_path: dtw.path,
        })
    }
}
