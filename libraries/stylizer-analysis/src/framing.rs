//! Overlapping analysis frames
//!
//! Both the cepstral fingerprint and the band energies walk the signal in
//! frames of [`FRAME_SIZE`] samples advancing by [`HOP_SIZE`]. A signal
//! always yields at least one frame; the last frame is zero-padded when it
//! runs past the end of the signal.

/// Analysis frame length in samples
pub const FRAME_SIZE: usize = 1024;

/// Distance between the starts of consecutive frames
pub const HOP_SIZE: usize = 256;

/// Number of frames covering a signal of `len` samples
///
/// One frame when the signal fits in a single frame (including an empty
/// signal), otherwise `1 + ceil((len - FRAME_SIZE) / HOP_SIZE)`.
pub fn frame_count(len: usize) -> usize {
    if len <= FRAME_SIZE {
        1
    } else {
        1 + (len - FRAME_SIZE).div_ceil(HOP_SIZE)
    }
}

/// Start offsets of every frame of a signal of `len` samples
pub fn frame_starts(len: usize) -> impl Iterator<Item = usize> {
    (0..frame_count(len)).map(|i| i * HOP_SIZE)
}

/// Copy the frame starting at `start` into `out`, zero-padding past the end
pub fn fill_frame(samples: &[f32], start: usize, out: &mut [f32]) {
    let available = samples.len().saturating_sub(start).min(out.len());
    if available > 0 {
        out[..available].copy_from_slice(&samples[start..start + available]);
    }
    out[available..].fill(0.0);
}
