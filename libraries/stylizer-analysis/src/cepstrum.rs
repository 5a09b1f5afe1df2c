//! Cepstral fingerprint
//!
//! Each frame is Hamming-windowed and transformed; its magnitude spectrum is
//! pooled into triangular mel bands spanning 0 Hz to Nyquist, log-compressed
//! and decorrelated with a DCT-II. The per-frame coefficients are averaged
//! into a single [`SpectralProfile`].

use crate::error::{AnalysisError, Result};
use crate::framing::{fill_frame, frame_starts, FRAME_SIZE};
use crate::spectrum::{SpectrumAnalyzer, Window};
use std::f64::consts::PI;
use stylizer_core::{AudioBuffer, SpectralProfile, CEPSTRAL_COEFFICIENTS};

/// Number of triangular mel bands
pub const MEL_BANDS: usize = CEPSTRAL_COEFFICIENTS;

/// Lower bound applied before taking the log of a band energy
const LOG_FLOOR: f32 = 1e-10;

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filters as `[num_mels][fft_size / 2 + 1]` weights
///
/// Filter edges are rounded to FFT bins, and every filter is at least one
/// bin wide.
pub fn mel_filter_bank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f32>> {
    let half_fft = fft_size / 2 + 1;
    let low_mel = hz_to_mel(low_freq);
    let high_mel = hz_to_mel(high_freq);

    // num_mels + 2 equally spaced edges
    let step = (high_mel - low_mel) / (num_mels + 1) as f64;
    let mut bins: Vec<usize> = (0..num_mels + 2)
        .map(|i| {
            let hz = mel_to_hz(low_mel + i as f64 * step);
            let bin = (hz * fft_size as f64 / f64::from(sample_rate)).round() as usize;
            bin.min(half_fft - 1)
        })
        .collect();

    for i in 1..bins.len() {
        if bins[i] <= bins[i - 1] {
            bins[i] = bins[i - 1] + 1;
        }
    }

    (0..num_mels)
        .map(|m| {
            let mut filter = vec![0.0f32; half_fft];
            let (left, center, right) = (bins[m], bins[m + 1], bins[m + 2]);

            for k in left..center.min(half_fft) {
                filter[k] = (k - left) as f32 / (center - left) as f32;
            }
            for k in center..=right.min(half_fft - 1) {
                filter[k] = (right - k) as f32 / (right - center) as f32;
            }
            filter
        })
        .collect()
}

/// Unnormalized DCT-II basis: `cos(π k (j + 0.5) / N)`
fn dct_basis() -> Vec<[f32; MEL_BANDS]> {
    (0..CEPSTRAL_COEFFICIENTS)
        .map(|k| {
            std::array::from_fn(|j| {
                (PI * k as f64 * (j as f64 + 0.5) / MEL_BANDS as f64).cos() as f32
            })
        })
        .collect()
}

/// Frame-by-frame cepstral analysis at a fixed sample rate
pub struct CepstralExtractor {
    spectrum: SpectrumAnalyzer,
    filters: Vec<Vec<f32>>,
    dct: Vec<[f32; MEL_BANDS]>,
    frame: Vec<f32>,
}

impl CepstralExtractor {
    pub fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            spectrum: SpectrumAnalyzer::new(FRAME_SIZE, Window::Hamming),
            filters: mel_filter_bank(
                MEL_BANDS,
                FRAME_SIZE,
                sample_rate,
                0.0,
                f64::from(sample_rate) / 2.0,
            ),
            dct: dct_basis(),
            frame: vec![0.0; FRAME_SIZE],
        })
    }

    /// Cepstral coefficients of one frame of [`FRAME_SIZE`] samples
    pub fn frame_coefficients(&mut self, frame: &[f32]) -> [f32; CEPSTRAL_COEFFICIENTS] {
        let magnitudes = self.spectrum.magnitudes(frame);

        let log_energies: [f32; MEL_BANDS] = std::array::from_fn(|m| {
            let energy: f32 = self.filters[m]
                .iter()
                .zip(magnitudes)
                .map(|(w, mag)| w * mag)
                .sum();
            energy.max(LOG_FLOOR).ln()
        });

        std::array::from_fn(|k| {
            self.dct[k]
                .iter()
                .zip(&log_energies)
                .map(|(basis, e)| basis * e)
                .sum()
        })
    }

    /// Average the frame coefficients over a whole signal
    pub fn profile(&mut self, samples: &[f32]) -> SpectralProfile {
        let mut sums = [0.0f64; CEPSTRAL_COEFFICIENTS];
        let mut frames = 0usize;

        let mut frame = std::mem::take(&mut self.frame);
        for start in frame_starts(samples.len()) {
            fill_frame(samples, start, &mut frame);
            let coefficients = self.frame_coefficients(&frame);
            for (sum, c) in sums.iter_mut().zip(coefficients) {
                *sum += f64::from(c);
            }
            frames += 1;
        }
        self.frame = frame;

        tracing::debug!("Cepstral profile over {} frames", frames);

        SpectralProfile::new(sums.map(|s| (s / frames as f64) as f32))
    }
}

/// Cepstral fingerprint of a whole buffer
pub fn extract_profile(buffer: &AudioBuffer) -> Result<SpectralProfile> {
    let mut extractor = CepstralExtractor::new(buffer.sample_rate.as_hz())?;
    Ok(extractor.profile(&buffer.samples))
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
    fn hz_mel_roundtrip() {
        for hz in [0.0, 100.0, 440.0, 1000.0, 4000.0, 11_025.0] {
            assert!((mel_to_hz(hz_to_mel(hz)) - hz).abs() < 1e-6);
        }
    }

    #[test]
    fn filter_bank_spans_the_spectrum() {
        let bank = mel_filter_bank(MEL_BANDS, FRAME_SIZE, 22_050, 0.0, 11_025.0);
        assert_eq!(bank.len(), MEL_BANDS);
        assert!(bank.iter().all(|f| f.len() == FRAME_SIZE / 2 + 1));
        assert!(bank.iter().flatten().all(|&w| (0.0..=1.0).contains(&w)));

        // Every filter has some support, and the top filter reaches Nyquist's neighborhood
        assert!(bank.iter().all(|f| f.iter().any(|&w| w > 0.0)));
        let top = bank.last().unwrap();
        assert!(top[400..].iter().any(|&w| w > 0.0));
    }

    #[test]
    fn dct_basis_first_row_is_flat() {
        let basis = dct_basis();
        assert_eq!(basis.len(), CEPSTRAL_COEFFICIENTS);
        assert!(basis[0].iter().all(|&b| (b - 1.0).abs() < 1e-6));
    }

    #[test]
    fn silence_gives_floor_profile() {
        let buffer = AudioBuffer::new(vec![0.0; 4096], ANALYSIS_SAMPLE_RATE);
        let profile = extract_profile(&buffer).unwrap();
        let c = profile.coefficients();

        let expected_c0 = MEL_BANDS as f32 * LOG_FLOOR.ln();
        assert!((c[0] - expected_c0).abs() < 1e-2, "c0 {}", c[0]);
        assert!(c[1..].iter().all(|v| v.abs() < 1e-2));
    }

    #[test]
    fn empty_and_short_buffers_still_profile() {
        let empty = AudioBuffer::new(Vec::new(), ANALYSIS_SAMPLE_RATE);
        let short = AudioBuffer::new(sine(440.0, 300), ANALYSIS_SAMPLE_RATE);

        assert!(extract_profile(&empty).is_ok());
        let profile = extract_profile(&short).unwrap();
        assert!(profile.coefficients().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn profile_is_deterministic() {
        let buffer = AudioBuffer::new(sine(300.0, 10_000), ANALYSIS_SAMPLE_RATE);
        assert_eq!(
            extract_profile(&buffer).unwrap(),
            extract_profile(&buffer).unwrap()
        );
    }

    #[test]
    fn different_tones_give_different_profiles() {
        let low = extract_profile(&AudioBuffer::new(sine(220.0, 8000), ANALYSIS_SAMPLE_RATE));
        let high = extract_profile(&AudioBuffer::new(sine(3000.0, 8000), ANALYSIS_SAMPLE_RATE));
        assert_ne!(low.unwrap(), high.unwrap());
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let buffer = AudioBuffer::new(vec![0.0; 10], stylizer_core::SampleRate::new(0));
        assert_eq!(
            extract_profile(&buffer),
            Err(AnalysisError::InvalidSampleRate(0))
        );
    }
}
