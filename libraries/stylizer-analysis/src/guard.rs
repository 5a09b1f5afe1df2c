//! Similarity guard
//!
//! Compares two cepstral fingerprints and refuses to go on when they are
//! too close. The guard is the only gate between analysis and any output,
//! and its cap is validated once at construction.

use crate::error::{AnalysisError, Result};
use stylizer_core::SpectralProfile;

/// Default refusal threshold
pub const DEFAULT_SIMILARITY_CAP: f32 = 0.80;

/// Added to each squared norm before taking the root
const NORM_EPSILON: f64 = 1e-9;

/// Cosine similarity `a·b / (sqrt(|a|² + ε) · sqrt(|b|² + ε))`
///
/// Extra elements of the longer slice are ignored. Symmetric in its
/// arguments; two all-zero vectors compare as 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    (dot / ((norm_a + NORM_EPSILON).sqrt() * (norm_b + NORM_EPSILON).sqrt())) as f32
}

/// Refuses fingerprint pairs whose similarity reaches the cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityGuard {
    cap: f32,
}

impl SimilarityGuard {
    /// Create a guard; `cap` must be finite and in `(0, 1]`
    pub fn new(cap: f32) -> Result<Self> {
        if !cap.is_finite() || cap <= 0.0 || cap > 1.0 {
            return Err(AnalysisError::InvalidCap(cap));
        }
        Ok(Self { cap })
    }

    pub fn cap(&self) -> f32 {
        self.cap
    }

    /// Compare two fingerprints
    ///
    /// Returns the similarity when it is strictly below the cap, and
    /// [`AnalysisError::GuardRefusal`] otherwise.
    pub fn check(&self, source: &SpectralProfile, reference: &SpectralProfile) -> Result<f32> {
        let similarity = cosine_similarity(source.coefficients(), reference.coefficients());
        tracing::info!("Similarity={:.3} (cap={:.2})", similarity, self.cap);

        // NaN never passes
        if similarity < self.cap {
            Ok(similarity)
        } else {
            Err(AnalysisError::GuardRefusal {
                similarity,
                cap: self.cap,
            })
        }
    }
}

impl Default for SimilarityGuard {
    fn default() -> Self {
        Self {
            cap: DEFAULT_SIMILARITY_CAP,
        }
    }
}
