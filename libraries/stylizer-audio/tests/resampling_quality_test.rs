//! Resampling quality against measured signals
//!
//! Requires the `test-utils` feature for the signal generators and probes.

use stylizer_audio::resampling::{resample_buffer, ResamplingQuality};
use stylizer_audio::test_utils::*;

const SINC_PRESETS: [ResamplingQuality; 2] = [ResamplingQuality::Balanced, ResamplingQuality::High];

/// Middle half of a signal, away from filter edges
fn settled(samples: &[f32]) -> &[f32] {
    &samples[samples.len() / 4..samples.len() * 3 / 4]
}

#[test]
fn amplitude_is_preserved_downsampling() {
    let input = generate_sine_wave(1000.0, 44_100, 1.0, 0.5);

    for quality in SINC_PRESETS {
        let output = resample_buffer(&input, 44_100, 22_050, quality).unwrap();
        let ratio = calculate_rms(settled(&output)) / calculate_rms(settled(&input));
        assert!(
            (ratio - 1.0).abs() < 0.03,
            "{:?}: RMS ratio {}",
            quality,
            ratio
        );
    }
}

#[test]
fn amplitude_is_preserved_upsampling() {
    let input = generate_sine_wave(1000.0, 16_000, 1.0, 0.5);

    for quality in SINC_PRESETS {
        let output = resample_buffer(&input, 16_000, 22_050, quality).unwrap();
        let magnitude = tone_magnitude(settled(&output), 1000.0, 22_050);
        assert!(
            (magnitude - 0.5).abs() < 0.02,
            "{:?}: 1 kHz magnitude {}",
            quality,
            magnitude
        );
    }
}

#[test]
fn content_above_nyquist_does_not_alias() {
    // 15 kHz at 44.1 kHz would fold to 7.05 kHz at 22.05 kHz
    let input = generate_sine_wave(15_000.0, 44_100, 1.0, 0.5);

    for quality in SINC_PRESETS {
        let output = resample_buffer(&input, 44_100, 22_050, quality).unwrap();
        let alias = tone_magnitude(settled(&output), 7050.0, 22_050);
        assert!(
            linear_to_db(alias) < -40.0,
            "{:?}: alias at {} dBFS",
            quality,
            linear_to_db(alias)
        );
    }
}

#[test]
fn common_source_rates_reach_analysis_rate() {
    for rate in [8_000, 16_000, 32_000, 44_100, 48_000, 96_000] {
        let input = generate_white_noise(rate, 0.5, 0.3, 7);
        let output =
            resample_buffer(&input, rate, 22_050, ResamplingQuality::default()).unwrap();
        assert_eq!(output.len(), 11_025, "from {} Hz", rate);
        assert!(output.iter().all(|s| s.is_finite()));
    }
}
