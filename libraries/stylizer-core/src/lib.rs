//! Stylizer Core
//!
//! Platform-agnostic core types and traits for the stylizer.
//!
//! This crate provides the foundational building blocks shared by the audio,
//! analysis and application crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioBuffer`, `SpectralProfile`, `BandEnergyVector`,
//!   `GainVector`, `ConsentRecord`
//! - **Core Traits**: `AudioEffect`
//!
//! Each crate above this one carries its own error type.
//!
//! # Example
//!
//! ```rust
//! use stylizer_core::{AudioBuffer, SampleRate, ANALYSIS_SAMPLE_RATE};
//!
//! let buffer = AudioBuffer::new(vec![0.0; 22_050], ANALYSIS_SAMPLE_RATE);
//! assert_eq!(buffer.sample_rate, SampleRate::new(22_050));
//! assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]

pub mod traits;
pub mod types;

// Re-export commonly used types
pub use traits::AudioEffect;

pub use types::{
    // Audio types
    AudioBuffer, SampleRate, ANALYSIS_SAMPLE_RATE,
    // Analysis types
    BandEnergyVector, GainVector, SpectralProfile, BAND_CENTERS_HZ, BAND_COUNT,
    CEPSTRAL_COEFFICIENTS,
    // Consent
    ConsentRecord,
};
