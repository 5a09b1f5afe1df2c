//! Magnitude spectra of analysis frames

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window applied to a frame before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// No tapering
    Rectangular,
    /// `0.54 - 0.46 cos(2πi / (n - 1))`
    Hamming,
}

impl Window {
    /// Window coefficients for a frame of `n` samples
    pub fn coefficients(self, n: usize) -> Vec<f32> {
        match self {
            Self::Rectangular => vec![1.0; n],
            Self::Hamming if n <= 1 => vec![1.0; n],
            Self::Hamming => (0..n)
                .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / (n - 1) as f32).cos())
                .collect(),
        }
    }
}

/// Reusable windowed FFT producing one-sided magnitude spectra
///
/// The spectrum of an `n`-sample frame has `n / 2 + 1` bins; bin `k` sits at
/// `k · sample_rate / n` Hz.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize, window: Window) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch_len = fft.get_inplace_scratch_len();

        Self {
            fft,
            window: window.coefficients(size),
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            magnitudes: vec![0.0; size / 2 + 1],
        }
    }

    /// Frame length the analyzer was planned for
    pub fn size(&self) -> usize {
        self.window.len()
    }

    /// Number of bins in each spectrum
    pub fn bins(&self) -> usize {
        self.magnitudes.len()
    }

    /// Window `frame`, transform it and return its magnitude spectrum
    ///
    /// `frame` must be exactly [`size`](Self::size) samples long.
    pub fn magnitudes(&mut self, frame: &[f32]) -> &[f32] {
        debug_assert_eq!(frame.len(), self.window.len());

        for ((slot, &sample), &w) in self.buffer.iter_mut().zip(frame).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (mag, bin) in self.magnitudes.iter_mut().zip(&self.buffer) {
            *mag = bin.norm();
        }

        &self.magnitudes
    }
}
