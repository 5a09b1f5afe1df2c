//! Sample Rate Conversion
//!
//! Brings decoded audio to the fixed analysis rate before any spectral work.
//!
//! ## Features
//!
//! - **rubato backend**: portable, band-limited sinc or fast polynomial
//! - **Quality presets**: Fast, Balanced, High
//! - **One-shot helper**: [`resample_buffer`] resamples a whole buffer and
//!   drains the resampler's delay line so the result stays
//!   time-aligned with the input
//!
//! ## Example
//!
//! ```rust
//! use stylizer_audio::resampling::{resample_buffer, ResamplingQuality};
//!
//! let input = vec![0.0f32; 44_100]; // one second of mono silence
//! let output = resample_buffer(&input, 44_100, 22_050, ResamplingQuality::Balanced).unwrap();
//! assert_eq!(output.len(), 22_050);
//! ```

mod rubato_backend;

use thiserror::Error;

pub use rubato_backend::RubatoResampler;

/// Resampling errors
#[derive(Error, Debug)]
pub enum ResamplingError {
    #[error("Invalid sample rate: {0} Hz (must be > 0 and < 1MHz)")]
    InvalidSampleRate(u32),

    #[error("Invalid channel count: {0} (must be 1-8)")]
    InvalidChannelCount(usize),

    #[error("Resampler initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

pub type Result<T> = std::result::Result<T, ResamplingError>;

/// Resampling quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResamplingQuality {
    /// Fast - linear polynomial interpolation, no anti-aliasing filter
    Fast,

    /// Balanced - sinc interpolation, 95% passband
    /// Adequate for coarse spectral analysis
    #[default]
    Balanced,

    /// High - longer sinc, 99% passband
    High,
}

impl ResamplingQuality {
    /// Get transition band width (0.0 - 1.0, normalized to Nyquist)
    pub fn transition_band(&self) -> f64 {
        match self {
            Self::Fast => 0.10,
            Self::Balanced => 0.05,
            Self::High => 0.01,
        }
    }
}

/// Trait for resampler implementations
pub trait ResamplerImpl: Send {
    /// Process interleaved audio samples
    ///
    /// Returns whatever output the complete input chunks produced; partial
    /// chunks stay buffered until more input arrives or `flush` is called.
    fn process(&mut self, input: &[f32]) -> Result<Vec<f32>>;

    /// Process buffered input that did not fill a complete chunk
    fn flush(&mut self) -> Result<Vec<f32>>;

    /// Push silence through the resampler to release its delay line
    fn drain_delay_line(&mut self) -> Result<Vec<f32>>;

    /// Output delay in output frames
    fn latency(&self) -> usize;

    /// Get input sample rate
    fn input_rate(&self) -> u32;

    /// Get output sample rate
    fn output_rate(&self) -> u32;

    /// Reset internal state
    fn reset(&mut self);
}

fn validate_rate(rate: u32) -> Result<()> {
    if rate == 0 || rate > 1_000_000 {
        return Err(ResamplingError::InvalidSampleRate(rate));
    }
    Ok(())
}

/// Expected output length for `input_len` mono samples
pub fn output_len(input_len: usize, input_rate: u32, output_rate: u32) -> usize {
    let ratio = output_rate as f64 / input_rate as f64;
    (input_len as f64 * ratio).round() as usize
}

/// Resample a whole mono buffer in one go
///
/// The result has exactly [`output_len`] samples and is aligned with the
/// input. rubato's fixed-input resamplers already emit their first output
/// frame at input time zero, so nothing is trimmed from the front; the delay
/// line is drained until the expected length is reached.
pub fn resample_buffer(
    input: &[f32],
    input_rate: u32,
    output_rate: u32,
    quality: ResamplingQuality,
) -> Result<Vec<f32>> {
    validate_rate(input_rate)?;
    validate_rate(output_rate)?;

    if input_rate == output_rate {
        return Ok(input.to_vec());
    }

    let expected = output_len(input.len(), input_rate, output_rate);
    if expected == 0 {
        return Ok(Vec::new());
    }

    let mut resampler = RubatoResampler::new(input_rate, output_rate, 1, quality)?;
    tracing::debug!(
        "Resampling {} -> {} Hz, filter latency {} frames",
        input_rate,
        output_rate,
        resampler.latency()
    );

    let mut output = resampler.process(input)?;
    output.extend(resampler.flush()?);
    while output.len() < expected {
        let tail = resampler.drain_delay_line()?;
        if tail.is_empty() {
            break;
        }
        output.extend(tail);
    }

    output.resize(expected, 0.0);
    Ok(output)
}
