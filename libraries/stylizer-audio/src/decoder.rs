/// Audio decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use std::path::Path;
use stylizer_core::{AudioBuffer, SampleRate};
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Audio decoder using Symphonia
///
/// Supports: MP3, FLAC, OGG, WAV, AAC
///
/// Always loads the entire file into memory and downmixes it to mono by
/// averaging channels. The native sample rate is preserved; resampling to
/// the analysis rate is the job of [`crate::ingest`].
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a whole file into a mono buffer at its native rate
    pub fn decode_file(&mut self, path: &Path) -> Result<AudioBuffer> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint to help the format registry guess the format
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::Symphonia(format!("Failed to probe file: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

        let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
            AudioError::UnsupportedFormat(format!("{}: unknown sample rate", path.display()))
        })?;
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        let mut all_samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => {
                    return Err(AudioError::Symphonia(format!(
                        "Error reading packet: {}",
                        e
                    )));
                }
            };

            // Skip packets that are not for the default track
            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!("Skipping undecodable packet in {}: {}", path.display(), e);
                    continue;
                }
                Err(e) => {
                    return Err(AudioError::DecodeError(format!("Decode error: {}", e)));
                }
            };

            all_samples.extend(Self::convert_buffer(decoded));
        }

        tracing::debug!(
            "Decoded {} ({} samples at {} Hz)",
            path.display(),
            all_samples.len(),
            sample_rate
        );

        Ok(AudioBuffer::new(all_samples, SampleRate::new(sample_rate)))
    }

    /// Convert a Symphonia audio buffer to mono f32 samples in [-1.0, 1.0]
    ///
    /// Signed integers use symmetric scaling (divide by 2^(N-1)).
    fn convert_buffer(decoded: AudioBufferRef) -> Vec<f32> {
        match decoded {
            AudioBufferRef::F32(buf) => Self::mix_to_mono(&*buf, |s| s.clamp(-1.0, 1.0)),
            AudioBufferRef::F64(buf) => Self::mix_to_mono(&*buf, |s| (s as f32).clamp(-1.0, 1.0)),
            AudioBufferRef::S32(buf) => Self::mix_to_mono(&*buf, |s| s as f32 / 2147483648.0),
            AudioBufferRef::S24(buf) => {
                Self::mix_to_mono(&*buf, |s| s.inner() as f32 / 8388608.0)
            }
            AudioBufferRef::S16(buf) => Self::mix_to_mono(&*buf, |s| s as f32 / 32768.0),
            AudioBufferRef::S8(buf) => Self::mix_to_mono(&*buf, |s| s as f32 / 128.0),
            AudioBufferRef::U32(buf) => Self::mix_to_mono(&*buf, |s| {
                (s as f32 / u32::MAX as f32) * 2.0 - 1.0
            }),
            AudioBufferRef::U24(buf) => Self::mix_to_mono(&*buf, |s| {
                (s.inner() as f32 / 16777215.0) * 2.0 - 1.0
            }),
            AudioBufferRef::U16(buf) => Self::mix_to_mono(&*buf, |s| {
                (s as f32 / u16::MAX as f32) * 2.0 - 1.0
            }),
            AudioBufferRef::U8(buf) => Self::mix_to_mono(&*buf, |s| {
                (s as f32 / u8::MAX as f32) * 2.0 - 1.0
            }),
        }
    }

    /// Average all channels of a planar buffer into one
    fn mix_to_mono<T, F>(buf: &symphonia::core::audio::AudioBuffer<T>, normalize: F) -> Vec<f32>
    where
        T: symphonia::core::sample::Sample + Copy,
        F: Fn(T) -> f32,
    {
        let frames = buf.frames();
        let channels = buf.spec().channels.count();

        match channels {
            0 => vec![0.0; frames],
            1 => buf.chan(0).iter().map(|&s| normalize(s)).collect(),
            _ => {
                let mut output = vec![0.0f32; frames];
                for ch in 0..channels {
                    for (out, &s) in output.iter_mut().zip(buf.chan(ch)) {
                        *out += normalize(s);
                    }
                }
                let scale = 1.0 / channels as f32;
                for sample in &mut output {
                    *sample *= scale;
                }
                output
            }
        }
    }
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self::new()
    }
}
