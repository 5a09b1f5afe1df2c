//! WAV output
//!
//! Writes mono 16-bit PCM. The file is assembled under a temporary name in
//! the destination directory and renamed into place only once the WAV header
//! has been finalized, so a failed write never leaves a partial file at the
//! requested path.

use crate::error::{AudioError, Result};
use std::io::BufWriter;
use std::path::Path;
use stylizer_core::AudioBuffer;

/// Bits per sample of every file this module writes
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 16;

/// Convert a float sample to 16-bit PCM, clipping to full scale
#[inline]
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}

/// Write `buffer` to `path` as mono 16-bit PCM
///
/// Returns the number of samples written.
pub fn write_pcm16(path: &Path, buffer: &AudioBuffer) -> Result<usize> {
    if buffer.sample_rate.as_hz() == 0 {
        return Err(AudioError::InvalidBuffer(
            "sample rate must be non-zero".to_string(),
        ));
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate.as_hz(),
        bits_per_sample: OUTPUT_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = tempfile::Builder::new()
        .prefix(".stylizer-")
        .suffix(".wav.part")
        .tempfile_in(dir)?;

    {
        let file = temp.as_file().try_clone()?;
        let mut writer = hound::WavWriter::new(BufWriter::new(file), spec)?;
        for &sample in &buffer.samples {
            writer.write_sample(to_pcm16(sample))?;
        }
        writer.finalize()?;
    }

    temp.persist(path).map_err(|e| AudioError::Io(e.error))?;

    tracing::debug!(
        "Wrote {} samples at {} Hz to {}",
        buffer.samples.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(buffer.samples.len())
}
