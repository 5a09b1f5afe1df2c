mod analysis;
mod audio;
mod consent;

pub use analysis::{
    BandEnergyVector, GainVector, SpectralProfile, BAND_CENTERS_HZ, BAND_COUNT,
    CEPSTRAL_COEFFICIENTS,
};
pub use audio::{AudioBuffer, SampleRate, ANALYSIS_SAMPLE_RATE};
pub use consent::ConsentRecord;
