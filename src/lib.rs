//! HBCore — heartbeat classification core.
//!
//! Cleans a raw ECG signal with a three-stage zero-phase filter chain,
//! segments it into fixed-length beats around R-peak fiducials, z-scores
//! each beat, and classifies single beats as Normal or Abnormal by their
//! Dynamic Time Warping distance to a synthetic Normal reference template.
//!
//! The core is pure computation: record parsing, session handling and any
//! plotting of the returned cost matrix / warping path live in the
//! application layer on top of this crate.

pub mod analysis;
mod log;

pub use analysis::classify::{Classification, Classifier, Label, DEFAULT_THRESHOLD};
pub use analysis::dtw::{self, DtwOutput};
pub use analysis::error::AnalysisError;
pub use analysis::fiducial::RPeakParameters;
pub use analysis::reference::{ReferenceTemplate, REFERENCE_LEN};
pub use analysis::segment::{Beat, Fiducial};
pub use analysis::{Pipeline, PipelineConfig};
