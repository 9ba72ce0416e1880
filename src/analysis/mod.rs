use std::error::Error;

use ndarray::ArrayView1;
use slog::{debug, info, Logger};

pub mod classify;
pub mod dtw;
pub mod error;
pub mod fiducial;
pub mod filter;
pub mod normalize;
pub mod reference;
pub mod segment;
mod tests;

use crate::log::create_logger;
use error::AnalysisError;
use fiducial::RPeakParameters;
use segment::{Beat, Fiducial};

/// Knobs of the cleaning and segmentation pipeline. The powerline frequency
/// and classification threshold are deployment-specific, so both live in
/// configuration instead of being hard-coded (50 Hz grids exist).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub sampling_rate: f64,
    pub highpass_cutoff_hz: f64,
    pub powerline_hz: f64,
    pub notch_q: f64,
    pub lowpass_cutoff_hz: f64,
    pub pre_window_s: f64,
    pub post_window_s: f64,
}

impl PipelineConfig {
    pub fn for_sampling_rate(sampling_rate: f64) -> Self {
        PipelineConfig {
            sampling_rate,
            highpass_cutoff_hz: 0.5,
            powerline_hz: 60.0,
            notch_q: 30.0,
            lowpass_cutoff_hz: 50.0,
            pre_window_s: 0.2,
            post_window_s: 0.4,
        }
    }

    /// Samples kept before the fiducial (200 ms by default).
    pub fn pre_samples(&self) -> usize {
        (self.pre_window_s * self.sampling_rate).round() as usize
    }

    /// Samples kept after the fiducial (400 ms by default).
    pub fn post_samples(&self) -> usize {
        (self.post_window_s * self.sampling_rate).round() as usize
    }
}

/// Filter -> segment -> normalize, invoked once per uploaded record.
///
/// The optional plotter is a debugging hook: when wired in, intermediate
/// signals are handed to it for rendering, and plot failures never affect
/// the computation.
pub struct Pipeline {
    pub config: PipelineConfig,

    pub plotter: Option<
        Box<
            dyn Fn(ArrayView1<f64>, &str, &str, Option<Vec<usize>>) -> Result<(), Box<dyn Error>>
                + Send
                + Sync,
        >,
    >,

    logger: Logger,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            plotter: None,
            logger: create_logger("pipeline".to_string()),
        }
    }

    /// Runs the full transformation on one record: cleans the raw signal,
    /// cuts one fixed-length window per in-bounds fiducial, and z-scores
    /// each resulting beat. Beats come back in fiducial order.
    pub fn transform(
        &self,
        raw_signal: ArrayView1<f64>,
        fiducials: &[Fiducial],
    ) -> Result<Vec<Beat>, AnalysisError> {
        let cleaned = filter::clean_signal(raw_signal, &self.config)?;
        debug!(self.logger, "signal cleaned"; "len" => cleaned.len());

        self.plot_signal(
            cleaned.view(),
            "Filtered Signal",
            "signal_filtered.png",
            Some(fiducials.iter().map(|f| f.index).collect()),
        );

        let pre = self.config.pre_samples();
        let post = self.config.post_samples();
        let mut beats = segment::segment(cleaned.view(), fiducials, pre, post);

        info!(self.logger, "record segmented";
            "beats" => beats.len(),
            "dropped" => fiducials.len() - beats.len()
        );

        if beats.is_empty() {
            return Err(AnalysisError::EmptySegmentSet);
        }

        normalize::normalize_beats(&mut beats);
        Ok(beats)
    }

    /// Fallback for records without annotations: detect R-peaks on an
    /// already-cleaned signal and use those as fiducials.
    pub fn detect_fiducials(&self, cleaned_signal: ArrayView1<f64>) -> Vec<Fiducial> {
        let params = RPeakParameters::for_sampling_rate(self.config.sampling_rate);
        let peaks = fiducial::detect_r_peaks(cleaned_signal, &params);
        debug!(self.logger, "fiducials detected"; "count" => peaks.len());
        peaks
    }

    fn plot_signal(
        &self,
        signal: ArrayView1<f64>,
        title: &str,
        filename: &str,
        points: Option<Vec<usize>>,
    ) {
        if let Some(f) = &self.plotter {
            f(signal, title, filename, points).unwrap_or_else(|e| {
                eprintln!("Error plotting {}: {}", filename, e);
            });
        }
    }
}
