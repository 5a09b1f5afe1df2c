/// Multi-band equalizer
///
/// A fixed cascade of RBJ biquads, one per coarse band: peaking filters on
/// the first four centers and a high shelf on the last. Coefficients follow
/// the Audio EQ Cookbook with `A = sqrt(linear_gain)`, i.e. `10^(dB/40)`.
///
/// Filter memory lives inside the effect and carries over from one frame to
/// the next, so a stream processed frame by frame is bit-identical to the
/// same stream processed in one call.
use super::chain::AudioEffect;
use stylizer_core::{GainVector, BAND_CENTERS_HZ, BAND_COUNT};

/// Q of the four peaking bands
pub const PEAKING_Q: f32 = 1.0;

/// Q of the top high-shelf band
pub const SHELF_Q: f32 = 0.707;

/// Fraction of the sample rate a filter frequency is clamped to
const MAX_FREQUENCY_RATIO: f32 = 0.49;

/// Filter type for EQ bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Peaking - boosts/cuts around frequency with Q bandwidth
    #[default]
    Peaking,
    /// High shelf - boosts/cuts above frequency
    HighShelf,
}

/// EQ band configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqBand {
    /// Center (or corner) frequency in Hz
    pub frequency: f32,
    gain_db: f32,
    q: f32,
    filter_type: FilterType,
}

impl EqBand {
    /// Create a peaking band
    pub fn peaking(frequency: f32, gain_db: f32, q: f32) -> Self {
        Self {
            frequency,
            gain_db,
            q,
            filter_type: FilterType::Peaking,
        }
    }

    /// Create a high shelf band
    pub fn high_shelf(frequency: f32, gain_db: f32, q: f32) -> Self {
        Self {
            frequency,
            gain_db,
            q,
            filter_type: FilterType::HighShelf,
        }
    }

    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    /// Linear amplitude gain, `10^(dB/20)`
    pub fn linear_gain(&self) -> f32 {
        10.0_f32.powf(self.gain_db / 20.0)
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}

/// Mono biquad filter (direct form I)
#[derive(Debug, Clone)]
struct BiquadFilter {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadFilter {
    /// Create a new biquad filter with neutral coefficients
    fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Angular frequency terms, or `None` for an unusable sample rate
    fn omega_terms(sample_rate: f32, frequency: f32) -> Option<(f32, f32)> {
        if sample_rate < 1.0 {
            return None;
        }
        let clamped_freq = frequency.min(sample_rate * MAX_FREQUENCY_RATIO);
        let omega = 2.0 * std::f32::consts::PI * clamped_freq / sample_rate;
        Some((omega.sin(), omega.cos()))
    }

    fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }

    /// Configure as peaking EQ filter
    fn set_peaking(&mut self, sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) {
        let Some((sin_omega, cos_omega)) = Self::omega_terms(sample_rate, frequency) else {
            return;
        };

        let a = linear_gain.sqrt();
        let alpha = sin_omega / (2.0 * q);

        self.set_coefficients(
            1.0 + alpha * a,
            -2.0 * cos_omega,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cos_omega,
            1.0 - alpha / a,
        );
    }

    /// Configure as high shelf filter
    fn set_high_shelf(&mut self, sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) {
        let Some((sin_omega, cos_omega)) = Self::omega_terms(sample_rate, frequency) else {
            return;
        };

        let a = linear_gain.sqrt();
        let alpha = sin_omega / 2.0 * ((a + 1.0 / a) * (1.0 / q - 1.0) + 2.0).sqrt();
        let beta = 2.0 * a.sqrt() * alpha;

        self.set_coefficients(
            a * ((a + 1.0) + (a - 1.0) * cos_omega + beta),
            -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega),
            a * ((a + 1.0) + (a - 1.0) * cos_omega - beta),
            (a + 1.0) - (a - 1.0) * cos_omega + beta,
            2.0 * ((a - 1.0) - (a + 1.0) * cos_omega),
            (a + 1.0) - (a - 1.0) * cos_omega - beta,
        );
    }

    #[inline]
    fn process_sample(&mut self, input: f32) -> f32 {
        let mut out = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        // Flush denormals
        if out.abs() < 1e-15 {
            out = 0.0;
        }

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = out;

        out
    }

    /// Reset filter state (but preserve coefficients)
    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

/// Five-band equalizer configured from a [`GainVector`]
pub struct MultiBandEq {
    filters: [BiquadFilter; BAND_COUNT],
    bands: [EqBand; BAND_COUNT],
    enabled: bool,
    sample_rate: u32,
    needs_update: bool,
}

impl MultiBandEq {
    /// Build the cascade for `gains` at `sample_rate`
    ///
    /// The last band is a high shelf at its center; all others are peaking
    /// filters.
    pub fn from_gains(gains: &GainVector, sample_rate: u32) -> Self {
        let gains_db = gains.gains_db();
        let bands = std::array::from_fn(|i| {
            if i == BAND_COUNT - 1 {
                EqBand::high_shelf(BAND_CENTERS_HZ[i], gains_db[i], SHELF_Q)
            } else {
                EqBand::peaking(BAND_CENTERS_HZ[i], gains_db[i], PEAKING_Q)
            }
        });

        let mut eq = Self {
            filters: std::array::from_fn(|_| BiquadFilter::new()),
            bands,
            enabled: true,
            sample_rate,
            needs_update: true,
        };
        eq.update_filters();
        eq
    }

    /// Band configuration in cascade order
    pub fn bands(&self) -> &[EqBand; BAND_COUNT] {
        &self.bands
    }

    /// Process one sample through the whole cascade
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        self.filters
            .iter_mut()
            .fold(input, |sample, filter| filter.process_sample(sample))
    }

    /// Update filter coefficients if needed
    fn update_filters(&mut self) {
        if !self.needs_update {
            return;
        }

        let sr = self.sample_rate as f32;
        for (filter, band) in self.filters.iter_mut().zip(&self.bands) {
            match band.filter_type {
                FilterType::Peaking => {
                    filter.set_peaking(sr, band.frequency, band.q, band.linear_gain());
                }
                FilterType::HighShelf => {
                    filter.set_high_shelf(sr, band.frequency, band.q, band.linear_gain());
                }
            }
        }

        self.needs_update = false;
    }
}

impl AudioEffect for MultiBandEq {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.enabled {
            return;
        }

        if self.sample_rate != sample_rate {
            self.sample_rate = sample_rate;
            for filter in &mut self.filters {
                filter.reset();
            }
            self.needs_update = true;
        }

        self.update_filters();

        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Multi-band EQ"
    }
}
