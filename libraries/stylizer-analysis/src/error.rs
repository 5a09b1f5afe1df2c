//! Error types for spectral analysis

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Sample rate cannot be analyzed
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Similarity cap outside (0, 1]
    #[error("Invalid similarity cap: {0} (must be in (0, 1])")]
    InvalidCap(f32),

    /// Two fingerprints are too close to proceed
    #[error("Similarity {similarity:.3} is at or above the cap {cap:.2}")]
    GuardRefusal {
        /// Measured cosine similarity
        similarity: f32,
        /// Configured cap
        cap: f32,
    },
}
