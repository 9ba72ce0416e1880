use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type};
use ndarray::{Array1, ArrayView1};

use crate::analysis::error::AnalysisError;
use crate::analysis::PipelineConfig;

/// All Butterworth stages are order 3.
pub const FILTER_ORDER: usize = 3;

/// Minimum input length for stable zero-phase filtering: strictly more
/// than the usual filtfilt padding of 3 * (order + 1) samples.
pub const MIN_SIGNAL_LEN: usize = 3 * (FILTER_ORDER + 1) + 1;

/// Runs the three-stage cleaning chain on a raw ECG signal:
/// high-pass 0.5 Hz (baseline wander), notch at the powerline frequency,
/// low-pass 50 Hz (high-frequency noise). Every stage is zero-phase, so
/// fiducial indices taken on the raw signal stay valid on the output.
pub fn clean_signal(
    data: ArrayView1<f64>,
    config: &PipelineConfig,
) -> Result<Array1<f64>, AnalysisError> {
    if data.len() < MIN_SIGNAL_LEN {
        return Err(AnalysisError::InsufficientSignalLength {
            len: data.len(),
            min: MIN_SIGNAL_LEN,
        });
    }

    let fs = config.sampling_rate;
    let nyq = 0.5 * fs;
    for cutoff in [
        config.highpass_cutoff_hz,
        config.powerline_hz,
        config.lowpass_cutoff_hz,
    ] {
        if !(cutoff > 0.0 && cutoff < nyq) {
            return Err(AnalysisError::InvalidCutoff { cutoff, nyquist: nyq });
        }
    }

    // STAGE 1: baseline wander removal
    let no_baseline = highpass_filter(data, config.highpass_cutoff_hz, fs);

    // STAGE 2: powerline interference removal
    let no_powerline = notch_filter(
        no_baseline.view(),
        config.powerline_hz,
        config.notch_q,
        fs,
    );

    // STAGE 3: high-frequency denoising
    let cleaned = lowpass_filter(no_powerline.view(), config.lowpass_cutoff_hz, fs);

    Ok(cleaned)
}

pub fn highpass_filter(data: ArrayView1<f64>, cutoff: f64, fs: f64) -> Array1<f64> {
    // Order-3 Butterworth split into a first-order section and a Q=1.0
    // biquad section (the pole pair of the order-3 prototype).
    let single = first_order_highpass(cutoff, fs);
    let pair = Coefficients::<f64>::from_params(Type::HighPass, fs.hz(), cutoff.hz(), 1.0).unwrap();

    let forward = forward_filter(data, &single);
    let forward = forward_filter(forward.view(), &pair);
    let backward = backward_filter(forward.view(), &single);
    backward_filter(backward.view(), &pair)
}

pub fn lowpass_filter(data: ArrayView1<f64>, cutoff: f64, fs: f64) -> Array1<f64> {
    let single = first_order_lowpass(cutoff, fs);
    let pair = Coefficients::<f64>::from_params(Type::LowPass, fs.hz(), cutoff.hz(), 1.0).unwrap();

    let forward = forward_filter(data, &single);
    let forward = forward_filter(forward.view(), &pair);
    let backward = backward_filter(forward.view(), &single);
    backward_filter(backward.view(), &pair)
}

pub fn notch_filter(data: ArrayView1<f64>, center: f64, q: f64, fs: f64) -> Array1<f64> {
    let coeff = Coefficients::<f64>::from_params(Type::Notch, fs.hz(), center.hz(), q).unwrap();
    forward_backward_filter(data, &coeff)
}

// First-order sections via the bilinear transform, expressed as biquad
// coefficients with the second-order terms zeroed.

fn first_order_lowpass(cutoff: f64, fs: f64) -> Coefficients<f64> {
    let k = (std::f64::consts::PI * cutoff / fs).tan();
    let a0 = k + 1.0;
    Coefficients {
        b0: k / a0,
        b1: k / a0,
        b2: 0.0,
        a1: (k - 1.0) / a0,
        a2: 0.0,
    }
}

fn first_order_highpass(cutoff: f64, fs: f64) -> Coefficients<f64> {
    let k = (std::f64::consts::PI * cutoff / fs).tan();
    let a0 = k + 1.0;
    Coefficients {
        b0: 1.0 / a0,
        b1: -1.0 / a0,
        b2: 0.0,
        a1: (k - 1.0) / a0,
        a2: 0.0,
    }
}

fn forward_filter(data: ArrayView1<f64>, coefficients: &Coefficients<f64>) -> Array1<f64> {
    // Create the filter instance
    let mut filter = DirectForm1::<f64>::new(*coefficients);

    // Create an owned array from the view to manipulate and return
    let mut processed_data = data.to_owned();

    // Forward pass
    for sample in processed_data.iter_mut() {
        *sample = filter.run(*sample);
    }

    processed_data
}

fn backward_filter(data: ArrayView1<f64>, coefficients: &Coefficients<f64>) -> Array1<f64> {
    // Create the filter instance
    let mut filter = DirectForm1::<f64>::new(*coefficients);

    // Create an owned array from the view to manipulate and return
    let mut processed_data = data.to_owned();

    // Reverse the data for the backward pass
    processed_data.as_slice_mut().unwrap().reverse();

    // Backward pass
    for sample in processed_data.iter_mut() {
        *sample = filter.run(*sample);
    }

    // Re-reverse the data to restore original order
    processed_data.as_slice_mut().unwrap().reverse();

    processed_data
}

fn forward_backward_filter(data: ArrayView1<f64>, coefficients: &Coefficients<f64>) -> Array1<f64> {
    // Create the filter instance
    let mut filter = DirectForm1::<f64>::new(*coefficients);

    // Create an owned array from the view to manipulate and return
    let mut processed_data = data.to_owned();

    // Forward pass
    for sample in processed_data.iter_mut() {
        *sample = filter.run(*sample);
    }

    // Reverse the data for the backward pass
    processed_data.as_slice_mut().unwrap().reverse();

    // Reset the filter state for the backward pass
    let mut filter = DirectForm1::<f64>::new(*coefficients);

    // Backward pass
    for sample in processed_data.iter_mut() {
        *sample = filter.run(*sample);
    }

    // Re-reverse the data to restore original order
    processed_data.as_slice_mut().unwrap().reverse();

    processed_data
}
