//! Spectral analysis for the stylizer
//!
//! This crate provides:
//! - Overlapping frame iteration shared by every analysis
//! - A 20-coefficient cepstral fingerprint of a signal
//! - The similarity guard that refuses near-identical voices
//! - Coarse five-band energy estimation
//! - Bounded per-band gain computation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ AudioBuffer │ ──► │  Cepstrum    │ ──► │ SpectralProfile │ ──► SimilarityGuard
//! └─────────────┘     └──────────────┘     └─────────────────┘          │
//!        │                                                          pass │ refuse
//!        ▼                                                               ▼
//! ┌──────────────┐     ┌──────────────────┐     ┌────────────┐     GuardRefusal
//! │ Band Energy  │ ──► │ BandEnergyVector │ ──► │   Gains    │ ──► GainVector
//! └──────────────┘     └──────────────────┘     └────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use stylizer_analysis::{band_energies, compute_band_gains, extract_profile, SimilarityGuard};
//! use stylizer_core::{AudioBuffer, ANALYSIS_SAMPLE_RATE};
//!
//! let tone = |freq: f32| -> Vec<f32> {
//!     (0..22_050)
//!         .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / 22_050.0).sin() * 0.5)
//!         .collect()
//! };
//! let source = AudioBuffer::new(tone(220.0), ANALYSIS_SAMPLE_RATE);
//! let reference = AudioBuffer::new(tone(3000.0), ANALYSIS_SAMPLE_RATE);
//!
//! let guard = SimilarityGuard::default();
//! let similarity = guard
//!     .check(&extract_profile(&source)?, &extract_profile(&reference)?)?;
//! assert!(similarity < guard.cap());
//!
//! let gains = compute_band_gains(&band_energies(&source)?, &band_energies(&reference)?, 0.35);
//! assert!(gains.gains_db().iter().all(|g| g.abs() <= 1.5 * 0.35 + 1e-6));
//! # Ok::<(), stylizer_analysis::AnalysisError>(())
//! ```

mod bands;
mod cepstrum;
mod error;
pub mod framing;
mod gains;
mod guard;
pub mod spectrum;

pub use bands::{band_bins, band_energies, BAND_Q};
pub use cepstrum::{extract_profile, mel_filter_bank, CepstralExtractor, MEL_BANDS};
pub use error::{AnalysisError, Result};
pub use gains::{
    clamp_style_amount, compute_band_gains, DEFAULT_STYLE_AMOUNT, MAX_BAND_GAIN_DB,
    MAX_ENERGY_RATIO, MAX_STYLE_AMOUNT, MIN_ENERGY_RATIO,
};
pub use guard::{cosine_similarity, SimilarityGuard, DEFAULT_SIMILARITY_CAP};
