#[cfg(test)]
mod tests {
    use ndarray::{array, Array1};

    use crate::analysis::classify::{Classifier, Label};
    use crate::analysis::error::AnalysisError;
    use crate::analysis::fiducial::{detect_r_peaks, RPeakParameters};
    use crate::analysis::filter::{clean_signal, MIN_SIGNAL_LEN};
    use crate::analysis::normalize::{normalize_beats, zscore_in_place};
    use crate::analysis::reference::{ReferenceTemplate, REFERENCE_LEN};
    use crate::analysis::segment::{segment, Beat, Fiducial};
    use crate::analysis::{Pipeline, PipelineConfig};

    const TOLERANCE: f64 = 1e-6;

    fn fiducial(index: usize, label: &str) -> Fiducial {
        Fiducial {
            index,
            label: label.to_string(),
        }
    }

    /// A plausible raw record: 1 Hz baseline drift, 60 Hz hum, and one
    /// sharp R-like spike per fiducial.
    fn synthetic_record(len: usize, fs: f64, spike_positions: &[usize]) -> Array1<f64> {
        let mut signal = Array1::from_shape_fn(len, |i| {
            let t = i as f64 / fs;
            0.3 * (2.0 * std::f64::consts::PI * 1.0 * t).sin()
                + 0.05 * (2.0 * std::f64::consts::PI * 60.0 * t).sin()
        });

        for &center in spike_positions {
            for offset in 0..9usize {
                let i = center + offset - 4;
                if i < len {
                    let d = offset as f64 - 4.0;
                    signal[i] += 1.5 * (-d * d / 2.0).exp();
                }
            }
        }

        signal
    }

    #[test]
    fn filtering_preserves_signal_length() {
        let config = PipelineConfig::for_sampling_rate(360.0);
        let raw = synthetic_record(1000, 360.0, &[200, 500, 800]);

        let cleaned = clean_signal(raw.view(), &config).unwrap();
        assert_eq!(cleaned.len(), raw.len());
    }

    #[test]
    fn short_signal_is_rejected() {
        let config = PipelineConfig::for_sampling_rate(360.0);
        let raw = Array1::<f64>::zeros(MIN_SIGNAL_LEN - 1);

        match clean_signal(raw.view(), &config) {
            Err(AnalysisError::InsufficientSignalLength { len, min }) => {
                assert_eq!(len, MIN_SIGNAL_LEN - 1);
                assert_eq!(min, MIN_SIGNAL_LEN);
            }
            other => panic!("expected InsufficientSignalLength, got {:?}", other),
        }
    }

    #[test]
    fn cutoff_above_nyquist_is_rejected() {
        // 80 Hz sampling puts the 60 Hz notch above Nyquist
        let config = PipelineConfig::for_sampling_rate(80.0);
        let raw = Array1::<f64>::zeros(1000);

        match clean_signal(raw.view(), &config) {
            Err(AnalysisError::InvalidCutoff { cutoff, nyquist }) => {
                assert_eq!(cutoff, 60.0);
                assert_eq!(nyquist, 40.0);
            }
            other => panic!("expected InvalidCutoff, got {:?}", other),
        }
    }

    #[test]
    fn segmenter_emits_one_beat_per_in_bounds_fiducial() {
        let signal = Array1::from_shape_fn(1000, |i| i as f64);
        let fiducials = vec![
            fiducial(50, "N"),  // window start would be negative
            fiducial(200, "N"),
            fiducial(300, "V"),
            fiducial(950, "N"), // window end would pass the signal end
        ];

        let beats = segment(signal.view(), &fiducials, 72, 144);

        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].label, "N");
        assert_eq!(beats[1].label, "V");
        // Windows are [fiducial - pre, fiducial + post)
        assert_eq!(beats[0].samples[0], 128.0);
        assert_eq!(beats[0].samples[215], 343.0);
        assert_eq!(beats[0].samples.len(), 216);
    }

    #[test]
    fn segmenter_returns_empty_when_nothing_fits() {
        let signal = Array1::<f64>::zeros(100);
        let fiducials = vec![fiducial(10, "N")];

        let beats = segment(signal.view(), &fiducials, 72, 144);
        assert!(beats.is_empty());
    }

    #[test]
    fn normalization_yields_zero_mean_unit_std() {
        let mut beats = vec![Beat {
            samples: Array1::from_shape_fn(216, |i| (i as f64 * 0.1).sin() * 3.0 + 7.0),
            label: "N".to_string(),
        }];

        normalize_beats(&mut beats);

        let mean = beats[0].samples.mean().unwrap();
        let std = beats[0].samples.std(0.0);
        assert!(mean.abs() < TOLERANCE, "mean was {}", mean);
        assert!((std - 1.0).abs() < TOLERANCE, "std was {}", std);
    }

    #[test]
    fn constant_beat_normalizes_to_zeros() {
        let mut samples = Array1::from_elem(216, 5.0);
        zscore_in_place(&mut samples);

        assert!(samples.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn reference_template_has_fixed_length_and_is_reproducible() {
        let first = ReferenceTemplate::synthesize();
        let second = ReferenceTemplate::synthesize();

        assert_eq!(first.len(), REFERENCE_LEN);
        assert_eq!(first, second);

        // Normalized like any beat
        let mean = first.view().mean().unwrap();
        let std = first.view().std(0.0);
        assert!(mean.abs() < TOLERANCE);
        assert!((std - 1.0).abs() < TOLERANCE);

        // The R wave dominates the template
        let peak = first
            .view()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 3.0);
    }

    #[test]
    fn classifier_decision_rule_and_boundary() {
        let classifier = Classifier::new(67.0);
        let reference = array![0.0];

        // Single-sample sequences pin the DTW distance to |beat - reference|
        let below = classifier
            .classify(array![60.0].view(), reference.view())
            .unwrap();
        assert_eq!(below.label, Label::Normal);
        assert_eq!(below.distance, 60.0);
        assert!((below.confidence - (7.0 / 67.0 * 100.0)).abs() < TOLERANCE);

        let above = classifier
            .classify(array![70.0].view(), reference.view())
            .unwrap();
        assert_eq!(above.label, Label::Abnormal);

        // The boundary case classifies Abnormal
        let boundary = classifier
            .classify(array![67.0].view(), reference.view())
            .unwrap();
        assert_eq!(boundary.label, Label::Abnormal);
        assert_eq!(boundary.confidence, 0.0);
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let reference = array![0.0];

        for threshold in [0.0, -1.0, f64::NAN] {
            let classifier = Classifier::new(threshold);
            match classifier.classify(array![1.0].view(), reference.view()) {
                Err(AnalysisError::InvalidThreshold(_)) => {}
                other => panic!("expected InvalidThreshold, got {:?}", other),
            }
        }
    }

    #[test]
    fn r_peak_detection_finds_spikes_in_order() {
        let fs = 360.0;
        let signal = synthetic_record(1200, fs, &[250, 600, 950]);

        let config = PipelineConfig::for_sampling_rate(fs);
        let cleaned = clean_signal(signal.view(), &config).unwrap();
        let params = RPeakParameters::for_sampling_rate(fs);
        let peaks = detect_r_peaks(cleaned.view(), &params);

        assert_eq!(peaks.len(), 3);
        for (found, expected) in peaks.iter().zip([250usize, 600, 950]) {
            assert_eq!(found.label, "R");
            let distance = found.index.abs_diff(expected);
            assert!(distance <= 4, "peak at {} vs expected {}", found.index, expected);
        }
    }

    #[test]
    fn transform_produces_216_sample_beats_at_360_hz() {
        let fs = 360.0;
        let raw = synthetic_record(1000, fs, &[50, 200]);
        let fiducials = vec![fiducial(50, "N"), fiducial(200, "N")];

        let pipeline = Pipeline::new(PipelineConfig::for_sampling_rate(fs));
        let beats = pipeline.transform(raw.view(), &fiducials).unwrap();

        // The fiducial at 50 starts before the signal and is dropped
        assert_eq!(beats.len(), 1);
        assert_eq!(beats[0].samples.len(), 72 + 144);

        let mean = beats[0].samples.mean().unwrap();
        assert!(mean.abs() < TOLERANCE);
    }

    #[test]
    fn transform_with_no_surviving_window_fails() {
        let fs = 360.0;
        let raw = synthetic_record(1000, fs, &[]);
        let fiducials = vec![fiducial(10, "N")];

        let pipeline = Pipeline::new(PipelineConfig::for_sampling_rate(fs));
        match pipeline.transform(raw.view(), &fiducials) {
            Err(AnalysisError::EmptySegmentSet) => {}
            other => panic!("expected EmptySegmentSet, got {:?}", other),
        }
    }
}
