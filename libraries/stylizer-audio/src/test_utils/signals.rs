//! Test signal generation
//!
//! All generators return mono samples. Noise is seeded so tests stay
//! deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::path::Path;

/// Generate a sine wave
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `duration` - Duration in seconds
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
pub fn generate_sine_wave(
    frequency: f32,
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * frequency * t).sin() * amplitude
        })
        .collect()
}

/// Generate a harmonic tone with 1/k partial amplitudes
///
/// A crude stand-in for a voiced sound: a fundamental plus `partials - 1`
/// overtones, scaled so the peak stays below `amplitude`.
pub fn generate_harmonic_tone(
    fundamental: f32,
    partials: usize,
    sample_rate: u32,
    duration: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let nyquist = sample_rate as f32 / 2.0;
    let norm: f32 = (1..=partials.max(1)).map(|k| 1.0 / k as f32).sum();

    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let sum: f32 = (1..=partials.max(1))
                .filter(|&k| fundamental * (k as f32) < nyquist)
                .map(|k| (2.0 * PI * fundamental * k as f32 * t).sin() / k as f32)
                .sum();
            sum / norm * amplitude
        })
        .collect()
}

/// Generate seeded white noise
pub fn generate_white_noise(sample_rate: u32, duration: f32, amplitude: f32, seed: u64) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration) as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| rng.gen_range(-1.0f32..1.0) * amplitude)
        .collect()
}

/// Generate a single impulse at sample zero
pub fn generate_impulse(num_samples: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; num_samples];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

/// Write samples to a 16-bit PCM WAV file
///
/// `channels` > 1 duplicates the mono signal on every channel.
pub fn write_test_wav(path: &Path, samples: &[f32], sample_rate: u32, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).expect("create test wav");
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        for _ in 0..channels {
            writer.write_sample(value).expect("write test sample");
        }
    }
    writer.finalize().expect("finalize test wav");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_has_expected_length_and_peak() {
        let sine = generate_sine_wave(1000.0, 22_050, 0.5, 0.8);
        assert_eq!(sine.len(), 11_025);
        let peak = sine.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.8 && peak > 0.79);
    }

    #[test]
    fn harmonic_tone_stays_below_amplitude() {
        let tone = generate_harmonic_tone(150.0, 8, 22_050, 0.2, 0.5);
        assert!(tone.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn harmonic_tone_drops_partials_above_nyquist() {
        // Only the 6 kHz fundamental fits below 11.025 kHz
        let tone = generate_harmonic_tone(6000.0, 4, 22_050, 1.0, 0.5);
        let norm = 1.0 + 1.0 / 2.0 + 1.0 / 3.0 + 1.0 / 4.0;
        let peak = tone.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 0.5 / norm).abs() < 0.005, "peak {}", peak);
    }

    #[test]
    fn noise_is_reproducible() {
        let a = generate_white_noise(22_050, 0.1, 0.5, 7);
        let b = generate_white_noise(22_050, 0.1, 0.5, 7);
        let c = generate_white_noise(22_050, 0.1, 0.5, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn impulse_shape() {
        let impulse = generate_impulse(4, 1.0);
        assert_eq!(impulse, vec![1.0, 0.0, 0.0, 0.0]);
        assert!(generate_impulse(0, 1.0).is_empty());
    }
}
