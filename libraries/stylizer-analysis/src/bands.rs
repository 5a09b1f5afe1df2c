//! Coarse band energies
//!
//! Uses the same framing as the fingerprint but an untapered frame. Each
//! band is the mean FFT magnitude over the bins between
//! `max(20, c - bw/2)` and `min(sr/2, c + bw/2)`, with `bw = c / Q`.

use crate::error::{AnalysisError, Result};
use crate::framing::{fill_frame, frame_starts, FRAME_SIZE};
use crate::spectrum::{SpectrumAnalyzer, Window};
use std::f32::consts::SQRT_2;
use stylizer_core::{AudioBuffer, BandEnergyVector, BAND_CENTERS_HZ, BAND_COUNT};

/// Q of each band, aligned to `BAND_CENTERS_HZ`
pub const BAND_Q: [f32; BAND_COUNT] = [1.0, SQRT_2, SQRT_2, SQRT_2, SQRT_2];

/// Lowest frequency any band may reach down to
const MIN_BAND_FREQUENCY: f32 = 20.0;

/// Inclusive FFT bin range `(low, high)` of a band
///
/// Returns `None` when the band lies entirely outside the spectrum.
pub fn band_bins(center: f32, q: f32, sample_rate: u32, fft_size: usize) -> Option<(usize, usize)> {
    let sr = sample_rate as f32;
    let bandwidth = center / q;
    let f_min = (center - bandwidth / 2.0).max(MIN_BAND_FREQUENCY);
    let f_max = (center + bandwidth / 2.0).min(sr / 2.0);

    let last_bin = fft_size / 2;
    let low = ((f_min * fft_size as f32 / sr).floor().max(0.0) as usize).min(last_bin);
    let high = ((f_max * fft_size as f32 / sr).ceil().max(0.0) as usize).min(last_bin);

    (low <= high && f_min <= f_max).then_some((low, high))
}

/// Average magnitude per band over every frame of `buffer`
pub fn band_energies(buffer: &AudioBuffer) -> Result<BandEnergyVector> {
    let sample_rate = buffer.sample_rate.as_hz();
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidSampleRate(sample_rate));
    }

    let ranges: [Option<(usize, usize)>; BAND_COUNT] = std::array::from_fn(|i| {
        band_bins(BAND_CENTERS_HZ[i], BAND_Q[i], sample_rate, FRAME_SIZE)
    });

    let mut spectrum = SpectrumAnalyzer::new(FRAME_SIZE, Window::Rectangular);
    let mut frame = vec![0.0f32; FRAME_SIZE];
    let mut sums = [0.0f64; BAND_COUNT];
    let mut frames = 0usize;

    for start in frame_starts(buffer.samples.len()) {
        fill_frame(&buffer.samples, start, &mut frame);
        let magnitudes = spectrum.magnitudes(&frame);

        for (sum, range) in sums.iter_mut().zip(&ranges) {
            if let Some((low, high)) = *range {
                let band = &magnitudes[low..=high];
                let mean = band.iter().map(|&m| f64::from(m)).sum::<f64>() / band.len() as f64;
                *sum += mean;
            }
        }
        frames += 1;
    }

    let energies = sums.map(|s| (s / frames as f64) as f32);
    tracing::debug!("Band energies over {} frames: {:?}", frames, energies);

    Ok(BandEnergyVector::new(energies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylizer_core::ANALYSIS_SAMPLE_RATE;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / 22_050.0).sin() * 0.5)
            .collect()
    }

    #[test]
    fn bin_ranges_at_analysis_rate() {
        // 220 Hz, Q 1: 110..330 Hz
        assert_eq!(band_bins(220.0, 1.0, 22_050, 1024), Some((5, 16)));
        // 10 kHz shelf region is cut off at Nyquist
        let (low, high) = band_bins(10_000.0, SQRT_2, 22_050, 1024).unwrap();
        assert_eq!(high, 512);
        assert!(low < high);
    }

    #[test]
    fn band_entirely_above_nyquist_is_empty() {
        assert_eq!(band_bins(10_000.0, SQRT_2, 8_000, 1024), None);
    }

    #[test]
    fn tone_lights_up_its_band() {
        let buffer = AudioBuffer::new(sine(800.0, 22_050), ANALYSIS_SAMPLE_RATE);
        let energies = band_energies(&buffer).unwrap();
        let e = energies.energies();

        let loudest = (0..BAND_COUNT)
            .max_by(|&a, &b| e[a].total_cmp(&e[b]))
            .unwrap();
        assert_eq!(loudest, 1);
        assert!(e[1] > 10.0 * e[4]);
    }

    #[test]
    fn silence_has_no_energy() {
        let buffer = AudioBuffer::new(vec![0.0; 5000], ANALYSIS_SAMPLE_RATE);
        let energies = band_energies(&buffer).unwrap();
        assert!(energies.energies().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn scaling_the_signal_scales_the_energies() {
        let quiet = AudioBuffer::new(sine(2000.0, 6000), ANALYSIS_SAMPLE_RATE);
        let loud = AudioBuffer::new(
            quiet.samples.iter().map(|s| s * 2.0).collect(),
            ANALYSIS_SAMPLE_RATE,
        );

        let q = band_energies(&quiet).unwrap();
        let l = band_energies(&loud).unwrap();
        for (a, b) in q.energies().iter().zip(l.energies()) {
            assert!((b - 2.0 * a).abs() <= 1e-3 * b.max(1e-6), "{} vs {}", a, b);
        }
    }

    #[test]
    fn empty_buffer_yields_zero_energies() {
        let buffer = AudioBuffer::new(Vec::new(), ANALYSIS_SAMPLE_RATE);
        let energies = band_energies(&buffer).unwrap();
        assert_eq!(energies.energies(), &[0.0; BAND_COUNT]);
    }
}
