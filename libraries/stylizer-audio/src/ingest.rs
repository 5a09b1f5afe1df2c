//! Audio ingestion
//!
//! Loads a file, downmixes it to mono and resamples it to a target rate,
//! returning a fully materialized [`AudioBuffer`].

use crate::decoder::SymphoniaDecoder;
use crate::error::Result;
use crate::resampling::{resample_buffer, ResamplingQuality};
use std::path::Path;
use stylizer_core::{AudioBuffer, SampleRate};

/// Load `path` as a mono buffer at `target_rate`
pub fn load_mono(path: &Path, target_rate: SampleRate) -> Result<AudioBuffer> {
    load_mono_with_quality(path, target_rate, ResamplingQuality::default())
}

/// Load `path` as a mono buffer at `target_rate` using a specific resampler quality
pub fn load_mono_with_quality(
    path: &Path,
    target_rate: SampleRate,
    quality: ResamplingQuality,
) -> Result<AudioBuffer> {
    let mut decoder = SymphoniaDecoder::new();
    let decoded = decoder.decode_file(path)?;
    let native_rate = decoded.sample_rate;

    if native_rate == target_rate {
        return Ok(decoded);
    }

    let samples = resample_buffer(
        &decoded.samples,
        native_rate.as_hz(),
        target_rate.as_hz(),
        quality,
    )?;

    tracing::debug!(
        "Resampled {} from {} Hz to {} Hz ({} -> {} samples)",
        path.display(),
        native_rate.as_hz(),
        target_rate.as_hz(),
        decoded.samples.len(),
        samples.len()
    );

    Ok(AudioBuffer::new(samples, target_rate))
}
