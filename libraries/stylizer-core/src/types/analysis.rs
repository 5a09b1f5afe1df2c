/// Spectral analysis result types
use serde::{Deserialize, Serialize};

/// Number of cepstral coefficients in a `SpectralProfile`
pub const CEPSTRAL_COEFFICIENTS: usize = 20;

/// Number of coarse EQ bands
pub const BAND_COUNT: usize = 5;

/// Center frequencies of the coarse bands, lowest first
pub const BAND_CENTERS_HZ: [f32; BAND_COUNT] = [220.0, 800.0, 2000.0, 5000.0, 10000.0];

/// Averaged cepstral fingerprint of a signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralProfile {
    coefficients: [f32; CEPSTRAL_COEFFICIENTS],
}

impl SpectralProfile {
    /// Create a profile from its coefficients
    pub fn new(coefficients: [f32; CEPSTRAL_COEFFICIENTS]) -> Self {
        Self { coefficients }
    }

    /// The cepstral coefficients, lowest quefrency first
    pub fn coefficients(&self) -> &[f32; CEPSTRAL_COEFFICIENTS] {
        &self.coefficients
    }
}

/// Coarse magnitude energy per band, aligned to `BAND_CENTERS_HZ`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandEnergyVector {
    energies: [f32; BAND_COUNT],
}

impl BandEnergyVector {
    pub fn new(energies: [f32; BAND_COUNT]) -> Self {
        Self { energies }
    }

    pub fn energies(&self) -> &[f32; BAND_COUNT] {
        &self.energies
    }
}

/// Per-band gain adjustment in dB, aligned to `BAND_CENTERS_HZ`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainVector {
    gains_db: [f32; BAND_COUNT],
}

impl GainVector {
    pub fn new(gains_db: [f32; BAND_COUNT]) -> Self {
        Self { gains_db }
    }

    /// A vector that leaves every band untouched
    pub fn flat() -> Self {
        Self {
            gains_db: [0.0; BAND_COUNT],
        }
    }

    pub fn gains_db(&self) -> &[f32; BAND_COUNT] {
        &self.gains_db
    }

    /// Linear amplitude gains, `10^(dB/20)` per band
    pub fn linear_gains(&self) -> [f32; BAND_COUNT] {
        self.gains_db.map(|db| 10.0_f32.powf(db / 20.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_centers_are_ascending() {
        assert!(BAND_CENTERS_HZ.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn flat_gain_vector_is_unity() {
        let gains = GainVector::flat();
        assert!(gains.linear_gains().iter().all(|&g| (g - 1.0).abs() < 1e-6));
    }

    #[test]
    fn linear_gain_conversion() {
        let gains = GainVector::new([6.0206, -6.0206, 0.0, 20.0, -20.0]);
        let linear = gains.linear_gains();
        assert!((linear[0] - 2.0).abs() < 1e-3);
        assert!((linear[1] - 0.5).abs() < 1e-3);
        assert!((linear[3] - 10.0).abs() < 1e-3);
        assert!((linear[4] - 0.1).abs() < 1e-4);
    }
}
