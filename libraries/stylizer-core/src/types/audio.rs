/// Audio-related types
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f32 {
        self.0 as f32 / 2.0
    }
}

/// Fixed rate every signal is resampled to before analysis and processing.
pub const ANALYSIS_SAMPLE_RATE: SampleRate = SampleRate(22_050);

/// Mono audio buffer
///
/// Samples are stored as f32 in the range [-1.0, 1.0]. The buffer is fully
/// materialized so analysis stages can revisit any region.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Audio samples (f32, mono)
    pub samples: Vec<f32>,

    /// Sample rate of `samples`
    pub sample_rate: SampleRate,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(samples: Vec<f32>, sample_rate: SampleRate) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate.as_hz() == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate.as_hz() as f64
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_rate_is_22050() {
        assert_eq!(ANALYSIS_SAMPLE_RATE.as_hz(), 22_050);
        assert_eq!(ANALYSIS_SAMPLE_RATE.nyquist(), 11_025.0);
    }

    #[test]
    fn audio_buffer_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 11_025], ANALYSIS_SAMPLE_RATE);
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-9);
        assert_eq!(buffer.len(), 11_025);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn zero_rate_has_zero_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 10], SampleRate::new(0));
        assert_eq!(buffer.duration_secs(), 0.0);
    }
}
