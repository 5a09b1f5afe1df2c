/// Effect chain for processing audio
///
/// Effects are processed in order over mono f32 samples. A chain keeps its
/// effects' state between calls, so a long signal can be pushed through it one
/// frame at a time and come out identical to a single whole-buffer pass.
///
/// Every effect sees every frame, enabled or not; a disabled effect leaves the
/// samples alone but still advances any position it tracks.
pub use stylizer_core::AudioEffect;

/// Frame size used when streaming a buffer through a chain
pub const STREAM_FRAME_SIZE: usize = 2048;

/// Chain of audio effects processed in order
pub struct EffectChain {
    effects: Vec<Box<dyn AudioEffect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect to the end of the chain
    pub fn add_effect(&mut self, effect: Box<dyn AudioEffect>) {
        self.effects.push(effect);
    }

    /// Process one frame through the entire effect chain
    ///
    /// # Arguments
    /// * `buffer` - Mono samples
    /// * `sample_rate` - Sample rate in Hz
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        for effect in &mut self.effects {
            effect.process(buffer, sample_rate);
        }
    }

    /// Push a whole signal through the chain in consecutive frames
    ///
    /// Returns the number of frames processed. A `frame_size` of zero is
    /// treated as one.
    pub fn process_stream(
        &mut self,
        samples: &mut [f32],
        frame_size: usize,
        sample_rate: u32,
    ) -> usize {
        let mut frames = 0;
        for frame in samples.chunks_mut(frame_size.max(1)) {
            self.process(frame, sample_rate);
            frames += 1;
        }
        frames
    }

    /// Reset all effects in the chain
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }

    /// Get number of effects in chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Names of the effects in processing order
    pub fn effect_names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Enable/disable all effects
    pub fn set_enabled(&mut self, enabled: bool) {
        for effect in &mut self.effects {
            effect.set_enabled(enabled);
        }
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct GainEffect {
        gain: f32,
        enabled: bool,
    }

    impl AudioEffect for GainEffect {
        fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
            if !self.enabled {
                return;
            }
            for sample in buffer.iter_mut() {
                *sample *= self.gain;
            }
        }

        fn reset(&mut self) {}

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn name(&self) -> &str {
            "Gain"
        }
    }

    /// Counts samples seen so far, writing the running index into the buffer
    struct PositionEffect {
        position: usize,
    }

    impl AudioEffect for PositionEffect {
        fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
            for sample in buffer.iter_mut() {
                *sample = self.position as f32;
                self.position += 1;
            }
        }

        fn reset(&mut self) {
            self.position = 0;
        }

        fn set_enabled(&mut self, _enabled: bool) {}

        fn is_enabled(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "Position"
        }
    }

    fn gain(gain: f32) -> Box<dyn AudioEffect> {
        Box::new(GainEffect {
            gain,
            enabled: true,
        })
    }

    #[test]
    fn empty_chain() {
        let chain = EffectChain::new();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
    }

    #[test]
    fn process_chain_in_order() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(0.5));
        chain.add_effect(gain(2.0));
        assert_eq!(chain.effect_names(), vec!["Gain", "Gain"]);

        let mut buffer = vec![1.0; 100];
        chain.process(&mut buffer, 22_050);

        for sample in &buffer {
            assert!((sample - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn disabled_effect_bypassed() {
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(GainEffect {
            gain: 0.0,
            enabled: false,
        }));

        let mut buffer = vec![1.0; 100];
        chain.process(&mut buffer, 22_050);
        assert!(buffer.iter().all(|&s| (s - 1.0).abs() < 0.0001));
    }

    #[test]
    fn enable_disable_all() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(0.5));
        chain.add_effect(gain(0.5));
        chain.set_enabled(false);

        let mut buffer = vec![1.0; 100];
        chain.process(&mut buffer, 22_050);
        assert!(buffer.iter().all(|&s| (s - 1.0).abs() < 0.0001));
    }

    #[test]
    fn stream_counts_frames_including_partial_tail() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(1.0));

        let mut buffer = vec![0.0; 5000];
        assert_eq!(chain.process_stream(&mut buffer, 2048, 22_050), 3);

        let mut empty: Vec<f32> = Vec::new();
        assert_eq!(chain.process_stream(&mut empty, 2048, 22_050), 0);
    }

    #[test]
    fn stream_keeps_effect_state_between_frames() {
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(PositionEffect { position: 0 }));

        let mut buffer = vec![0.0; 10];
        chain.process_stream(&mut buffer, 3, 22_050);
        let expected: Vec<f32> = (0..10).map(|i| i as f32).collect();
        assert_eq!(buffer, expected);

        chain.reset();
        let mut again = vec![0.0; 2];
        chain.process(&mut again, 22_050);
        assert_eq!(again, vec![0.0, 1.0]);
    }

    #[test]
    fn watermark_disabled_in_chain_keeps_its_place() {
        use crate::effects::{Watermark, WatermarkSpec};

        let spec = WatermarkSpec::standard(22_050);
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(Watermark::standard(22_050)));

        // First frames pass with the burst switched off
        chain.set_enabled(false);
        let mut head = vec![0.0; 4096];
        chain.process_stream(&mut head, STREAM_FRAME_SIZE, 22_050);
        assert!(head.iter().all(|&s| s == 0.0));

        chain.set_enabled(true);
        let mut tail = vec![0.0; 8192];
        chain.process_stream(&mut tail, STREAM_FRAME_SIZE, 22_050);

        let start = spec.start_sample - head.len();
        assert!(tail[..start].iter().all(|&s| s == 0.0));
        assert!(tail[start..start + 100].iter().any(|&s| s != 0.0));
        assert!(tail[start + spec.length_samples..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn zero_frame_size_is_treated_as_one() {
        let mut chain = EffectChain::new();
        chain.add_effect(gain(1.0));
        let mut buffer = vec![0.0; 4];
        assert_eq!(chain.process_stream(&mut buffer, 0, 22_050), 4);
    }
}
