use thiserror::Error;

/// Failures raised by the analysis core. All are synchronous and propagate
/// unmodified to the caller; the core never retries.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("signal too short for zero-phase filtering: {len} samples, need at least {min}")]
    InsufficientSignalLength { len: usize, min: usize },

    #[error("filter frequency {cutoff} Hz must lie in (0, {nyquist}) Hz")]
    InvalidCutoff { cutoff: f64, nyquist: f64 },

    #[error("no fiducial produced a fully in-bounds beat window")]
    EmptySegmentSet,

    #[error("DTW needs two non-empty sequences, got lengths {n} and {m}")]
    DimensionMismatch { n: usize, m: usize },

    #[error("sequence of {len} samples exceeds the DTW limit of {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("classification threshold must be positive, got {0}")]
    InvalidThreshold(f64),
}
