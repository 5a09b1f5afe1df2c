//! Stylizer Audio
//!
//! Audio input, output and stream effects for the stylizer.
//!
//! This crate provides:
//! - Audio decoding via Symphonia (MP3, FLAC, OGG, WAV, AAC), downmixed to mono
//! - Band-limited resampling via rubato with delay compensation
//! - Ingestion: decode + resample to a fixed analysis rate in one call
//! - Atomic 16-bit mono WAV output via hound
//! - An effect chain with the multi-band EQ and the watermark burst
//!
//! # Example: Loading Audio
//!
//! ```rust,no_run
//! use stylizer_audio::load_mono;
//! use stylizer_core::ANALYSIS_SAMPLE_RATE;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let buffer = load_mono(Path::new("/voices/source.flac"), ANALYSIS_SAMPLE_RATE)?;
//! println!("Loaded {} samples at {} Hz", buffer.len(), buffer.sample_rate.as_hz());
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Using Effects
//!
//! ```rust
//! use stylizer_audio::effects::{EffectChain, MultiBandEq, Watermark, STREAM_FRAME_SIZE};
//! use stylizer_core::GainVector;
//!
//! let mut chain = EffectChain::new();
//! let gains = GainVector::new([0.3, -0.2, 0.0, 0.5, -0.9]);
//! chain.add_effect(Box::new(MultiBandEq::from_gains(&gains, 22_050)));
//! chain.add_effect(Box::new(Watermark::standard(22_050)));
//!
//! let mut samples = vec![0.0; 22_050];
//! let frames = chain.process_stream(&mut samples, STREAM_FRAME_SIZE, 22_050);
//! assert_eq!(frames, 11);
//! ```

mod decoder;
pub mod effects;
mod error;
mod ingest;
pub mod resampling;
mod writer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use decoder::SymphoniaDecoder;
pub use error::{AudioError, Result};
pub use ingest::{load_mono, load_mono_with_quality};
pub use resampling::{resample_buffer, ResamplingError, ResamplingQuality};
pub use writer::{to_pcm16, write_pcm16, OUTPUT_BITS_PER_SAMPLE};
