//! Measurement probes for verifying processed audio

use std::f64::consts::PI;

/// Calculate RMS (Root Mean Square) level
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Calculate peak level
///
/// Returns the absolute maximum sample value.
pub fn calculate_peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Convert linear amplitude to dB
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -100.0 // Silence
    } else {
        20.0 * linear.log10()
    }
}

/// Amplitude of a single frequency component (Goertzel, Hann window)
///
/// Returns an estimate of the peak amplitude of a sinusoid at `frequency`
/// in `samples`; a full-scale sine at exactly `frequency` reads close to its
/// amplitude.
pub fn tone_magnitude(samples: &[f32], frequency: f32, sample_rate: u32) -> f32 {
    let n = samples.len();
    if n < 2 || sample_rate == 0 {
        return 0.0;
    }

    let omega = 2.0 * PI * f64::from(frequency) / f64::from(sample_rate);
    let coeff = 2.0 * omega.cos();
    let mut s_prev = 0.0f64;
    let mut s_prev2 = 0.0f64;
    let mut window_sum = 0.0f64;

    for (i, &sample) in samples.iter().enumerate() {
        let w = 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos();
        window_sum += w;
        let s = f64::from(sample) * w + coeff * s_prev - s_prev2;
        s_prev2 = s_prev;
        s_prev = s;
    }

    let power = s_prev * s_prev + s_prev2 * s_prev2 - coeff * s_prev * s_prev2;
    (2.0 * power.max(0.0).sqrt() / window_sum) as f32
}

/// Difference between two signals as the RMS of their sample-wise error
pub fn calculate_signal_difference(signal_a: &[f32], signal_b: &[f32]) -> f32 {
    let len = signal_a.len().min(signal_b.len());
    if len == 0 {
        return 0.0;
    }
    let sum: f32 = signal_a
        .iter()
        .zip(signal_b)
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    (sum / len as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::signals::generate_sine_wave;

    #[test]
    fn rms_of_sine() {
        let sine = generate_sine_wave(1000.0, 22_050, 1.0, 1.0);
        assert!((calculate_rms(&sine) - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.01);
        assert_eq!(calculate_rms(&[]), 0.0);
    }

    #[test]
    fn tone_magnitude_finds_present_tone() {
        let sine = generate_sine_wave(3000.0, 22_050, 0.2, 0.5);
        let on = tone_magnitude(&sine, 3000.0, 22_050);
        let off = tone_magnitude(&sine, 1000.0, 22_050);
        assert!((on - 0.5).abs() < 0.05, "on-frequency magnitude {}", on);
        assert!(off < 0.01, "off-frequency magnitude {}", off);
    }

    #[test]
    fn db_conversion() {
        assert!((linear_to_db(1.0)).abs() < 1e-6);
        assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
        assert_eq!(linear_to_db(0.0), -100.0);
    }
}
