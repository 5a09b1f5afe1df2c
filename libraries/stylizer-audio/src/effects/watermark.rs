//! Watermark burst
//!
//! Adds a short, quiet two-tone burst at a fixed offset into the stream.
//! The tone is rendered once, peak-normalized, and then mixed in as frames go
//! by; the effect tracks the absolute stream position itself, so it lands in
//! the same place regardless of how the stream is framed.
//!
//! The burst frequencies are fixed constants. At the 22.05 kHz analysis rate
//! both lie above Nyquist and fold back into the audible band (18.1 kHz to
//! 3.95 kHz, 19.1 kHz to 2.95 kHz); [`WatermarkSpec::folded_frequencies`]
//! reports where each one actually lands.

use super::chain::AudioEffect;

/// Offset of the burst from the start of the stream, in seconds
pub const WATERMARK_START_SECS: f64 = 0.25;

/// Burst duration, in seconds
pub const WATERMARK_DURATION_SECS: f64 = 0.2;

/// Burst tone frequencies, in Hz
pub const WATERMARK_FREQUENCIES_HZ: [f32; 2] = [18_100.0, 19_100.0];

/// Burst peak level, in dBFS
pub const WATERMARK_LEVEL_DB: f32 = -42.0;

/// Smallest rendered peak that is still normalized
const MIN_TONE_PEAK: f64 = 1e-6;

/// Placement and content of the watermark burst
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkSpec {
    /// Absolute stream sample at which the burst starts
    pub start_sample: usize,
    /// Burst length in samples
    pub length_samples: usize,
    /// Tone frequencies in Hz
    pub frequencies: Vec<f32>,
    /// Peak level in dBFS
    pub level_db: f32,
}

impl WatermarkSpec {
    /// The standard burst for a stream at `sample_rate`
    pub fn standard(sample_rate: u32) -> Self {
        let sr = f64::from(sample_rate);
        Self {
            start_sample: (WATERMARK_START_SECS * sr).floor() as usize,
            length_samples: (WATERMARK_DURATION_SECS * sr).floor() as usize,
            frequencies: WATERMARK_FREQUENCIES_HZ.to_vec(),
            level_db: WATERMARK_LEVEL_DB,
        }
    }

    /// Linear peak amplitude of the burst
    pub fn peak_amplitude(&self) -> f32 {
        10.0_f32.powf(self.level_db / 20.0)
    }

    /// Number of burst samples that fit in a buffer of `buffer_len` samples
    /// starting at stream position zero
    pub fn overlay_len(&self, buffer_len: usize) -> usize {
        self.length_samples
            .min(buffer_len.saturating_sub(self.start_sample))
    }

    /// Frequencies as they appear after sampling at `sample_rate`
    pub fn folded_frequencies(&self, sample_rate: u32) -> Vec<f32> {
        let sr = sample_rate as f32;
        self.frequencies
            .iter()
            .map(|&f| {
                let wrapped = f.rem_euclid(sr);
                if wrapped > sr / 2.0 {
                    sr - wrapped
                } else {
                    wrapped
                }
            })
            .collect()
    }

    /// Render the burst at `sample_rate`, normalized to the target peak
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let sr = f64::from(sample_rate.max(1));
        let mut tone: Vec<f64> = (0..self.length_samples)
            .map(|i| {
                let t = i as f64 / sr;
                self.frequencies
                    .iter()
                    .map(|&f| (2.0 * std::f64::consts::PI * f64::from(f) * t).sin())
                    .sum()
            })
            .collect();

        let peak = tone.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        let scale = f64::from(self.peak_amplitude()) / peak.max(MIN_TONE_PEAK);
        for sample in &mut tone {
            *sample *= scale;
        }

        tone.into_iter().map(|s| s as f32).collect()
    }
}

/// Streaming watermark effect
///
/// The tone is rendered for the sample rate given at construction; the rate
/// passed to [`AudioEffect::process`] is not consulted.
pub struct Watermark {
    spec: WatermarkSpec,
    tone: Vec<f32>,
    position: usize,
    enabled: bool,
}

impl Watermark {
    pub fn new(spec: WatermarkSpec, sample_rate: u32) -> Self {
        let tone = spec.render(sample_rate);
        tracing::debug!(
            "Watermark burst: {} samples at offset {}, peak {:.6}",
            tone.len(),
            spec.start_sample,
            spec.peak_amplitude()
        );
        Self {
            spec,
            tone,
            position: 0,
            enabled: true,
        }
    }

    /// The standard burst at `sample_rate`
    pub fn standard(sample_rate: u32) -> Self {
        Self::new(WatermarkSpec::standard(sample_rate), sample_rate)
    }

    pub fn spec(&self) -> &WatermarkSpec {
        &self.spec
    }

    /// The rendered burst
    pub fn tone(&self) -> &[f32] {
        &self.tone
    }

    /// Absolute stream position of the next sample to be processed
    pub fn position(&self) -> usize {
        self.position
    }
}

impl AudioEffect for Watermark {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        let frame_start = self.position;
        let frame_end = frame_start + buffer.len();
        self.position = frame_end;

        if !self.enabled {
            return;
        }

        let burst_start = self.spec.start_sample;
        let burst_end = burst_start + self.tone.len();
        let from = frame_start.max(burst_start);
        let to = frame_end.min(burst_end);
        if from >= to {
            return;
        }

        let frame = &mut buffer[from - frame_start..to - frame_start];
        let tone = &self.tone[from - burst_start..to - burst_start];
        for (sample, &t) in frame.iter_mut().zip(tone) {
            *sample += t;
        }
    }

    fn reset(&mut self) {
        self.position = 0;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Watermark"
    }
}
