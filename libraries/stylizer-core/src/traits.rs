/// Core traits for the stylizer

/// Audio effect trait
///
/// Effects process mono frames in place, in stream order. Any state an
/// effect keeps (filter memory, stream position) carries over from one
/// `process` call to the next.
pub trait AudioEffect: Send {
    /// Process a frame of mono samples in place
    ///
    /// Called for every frame whether or not the effect is enabled; a
    /// disabled effect must leave `buffer` untouched.
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32);

    /// Reset effect state (start of a new stream)
    fn reset(&mut self);

    /// Enable/disable the effect
    fn set_enabled(&mut self, enabled: bool);

    /// Check if effect is enabled
    fn is_enabled(&self) -> bool;

    /// Get effect name (for debugging)
    fn name(&self) -> &str;
}
