//! Rubato resampler backend
//!
//! Portable resampling using the rubato crate.

use super::{validate_rate, ResamplerImpl, ResamplingError, ResamplingQuality, Result};
use rubato::{
    FastFixedIn, PolynomialDegree, Resampler as RubatoResamplerTrait, SincFixedIn,
    SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use std::collections::VecDeque;

/// Enum to hold different rubato resampler types
enum RubatoResamplerType {
    FastIn(FastFixedIn<f32>),
    SincIn(SincFixedIn<f32>),
}

/// Rubato-based resampler implementation
pub struct RubatoResampler {
    resampler: RubatoResamplerType,
    input_rate: u32,
    output_rate: u32,
    channels: usize,
    /// Buffer for accumulating input samples when they don't fill a complete chunk
    input_buffer: VecDeque<f32>,
}

impl RubatoResampler {
    /// Create a new rubato resampler
    pub fn new(
        input_rate: u32,
        output_rate: u32,
        channels: usize,
        quality: ResamplingQuality,
    ) -> Result<Self> {
        validate_rate(input_rate)?;
        validate_rate(output_rate)?;
        if channels == 0 || channels > 8 {
            return Err(ResamplingError::InvalidChannelCount(channels));
        }

        let ratio = output_rate as f64 / input_rate as f64;

        let chunk_size = match quality {
            ResamplingQuality::Fast | ResamplingQuality::Balanced => 1024,
            ResamplingQuality::High => 2048,
        };

        let resampler = match quality {
            ResamplingQuality::Fast => RubatoResamplerType::FastIn(
                FastFixedIn::new(
                    ratio,
                    1.0, // fixed ratio, no runtime adjustment
                    PolynomialDegree::Linear,
                    chunk_size,
                    channels,
                )
                .map_err(|e| {
                    ResamplingError::InitializationFailed(format!(
                        "FastFixedIn creation failed: {}",
                        e
                    ))
                })?,
            ),
            _ => RubatoResamplerType::SincIn(
                SincFixedIn::<f32>::new(
                    ratio,
                    1.0,
                    Self::quality_to_params(quality),
                    chunk_size,
                    channels,
                )
                .map_err(|e| {
                    ResamplingError::InitializationFailed(format!(
                        "SincFixedIn creation failed: {}",
                        e
                    ))
                })?,
            ),
        };

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
            channels,
            input_buffer: VecDeque::new(),
        })
    }

    /// Convert quality preset to rubato parameters
    fn quality_to_params(quality: ResamplingQuality) -> SincInterpolationParameters {
        match quality {
            ResamplingQuality::Fast | ResamplingQuality::Balanced => SincInterpolationParameters {
                sinc_len: 128,
                f_cutoff: 0.95,
                interpolation: SincInterpolationType::Cubic,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            ResamplingQuality::High => SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.99,
                interpolation: SincInterpolationType::Cubic,
                oversampling_factor: 512,
                window: WindowFunction::BlackmanHarris2,
            },
        }
    }

    /// Get expected input frame count for the next process call
    fn input_frames_next(&self) -> usize {
        match &self.resampler {
            RubatoResamplerType::FastIn(r) => r.input_frames_next(),
            RubatoResamplerType::SincIn(r) => r.input_frames_next(),
        }
    }

    /// Deinterleave samples from [L, R, L, R, ...] to [[L, L, ...], [R, R, ...]]
    fn deinterleave(&self, interleaved: &[f32], frames: usize) -> Vec<Vec<f32>> {
        let mut channels = vec![Vec::with_capacity(frames); self.channels];

        for frame in interleaved.chunks_exact(self.channels).take(frames) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        channels
    }

    /// Interleave samples from [[L, L, ...], [R, R, ...]] to [L, R, L, R, ...]
    fn interleave(&self, channels: &[Vec<f32>]) -> Vec<f32> {
        let Some(first) = channels.first() else {
            return Vec::new();
        };

        let frames = first.len();
        let mut interleaved = Vec::with_capacity(frames * self.channels);

        for frame_idx in 0..frames {
            for channel in channels {
                interleaved.push(channel[frame_idx]);
            }
        }

        interleaved
    }

    fn process_partial(&mut self, input: Option<&[Vec<f32>]>) -> Result<Vec<f32>> {
        let output_channels = match &mut self.resampler {
            RubatoResamplerType::FastIn(r) => r.process_partial(input, None).map_err(|e| {
                ResamplingError::ProcessingFailed(format!("FastIn flush failed: {}", e))
            })?,
            RubatoResamplerType::SincIn(r) => r.process_partial(input, None).map_err(|e| {
                ResamplingError::ProcessingFailed(format!("SincIn flush failed: {}", e))
            })?,
        };

        Ok(self.interleave(&output_channels))
    }
}

impl ResamplerImpl for RubatoResampler {
    fn process(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        if input.len() % self.channels != 0 {
            return Err(ResamplingError::ProcessingFailed(format!(
                "Input buffer size {} is not a multiple of channel count {}",
                input.len(),
                self.channels
            )));
        }

        if self.input_rate == self.output_rate {
            return Ok(input.to_vec());
        }

        self.input_buffer.extend(input.iter().copied());

        let mut output = Vec::new();

        // Only complete chunks go through process(); the remainder waits for flush()
        loop {
            let needed_frames = self.input_frames_next();
            let needed_samples = needed_frames * self.channels;

            if self.input_buffer.len() < needed_samples {
                break;
            }

            let chunk: Vec<f32> = self.input_buffer.drain(..needed_samples).collect();
            let input_channels = self.deinterleave(&chunk, needed_frames);

            let output_channels = match &mut self.resampler {
                RubatoResamplerType::FastIn(r) => {
                    r.process(&input_channels, None).map_err(|e| {
                        ResamplingError::ProcessingFailed(format!(
                            "FastIn resampling failed: {}",
                            e
                        ))
                    })?
                }
                RubatoResamplerType::SincIn(r) => {
                    r.process(&input_channels, None).map_err(|e| {
                        ResamplingError::ProcessingFailed(format!(
                            "SincIn resampling failed: {}",
                            e
                        ))
                    })?
                }
            };

            output.extend(self.interleave(&output_channels));
        }

        Ok(output)
    }

    fn flush(&mut self) -> Result<Vec<f32>> {
        if self.input_rate == self.output_rate {
            return Ok(self.input_buffer.drain(..).collect());
        }

        let remaining: Vec<f32> = self.input_buffer.drain(..).collect();
        let frames = remaining.len() / self.channels;
        if frames == 0 {
            return Ok(Vec::new());
        }

        let input_channels = self.deinterleave(&remaining, frames);
        self.process_partial(Some(&input_channels))
    }

    fn drain_delay_line(&mut self) -> Result<Vec<f32>> {
        if self.input_rate == self.output_rate {
            return Ok(Vec::new());
        }
        self.process_partial(None)
    }

    fn latency(&self) -> usize {
        match &self.resampler {
            RubatoResamplerType::FastIn(r) => r.output_delay(),
            RubatoResamplerType::SincIn(r) => r.output_delay(),
        }
    }

    fn input_rate(&self) -> u32 {
        self.input_rate
    }

    fn output_rate(&self) -> u32 {
        self.output_rate
    }

    fn reset(&mut self) {
        self.input_buffer.clear();

        match &mut self.resampler {
            RubatoResamplerType::FastIn(r) => r.reset(),
            RubatoResamplerType::SincIn(r) => r.reset(),
        }
    }
}
