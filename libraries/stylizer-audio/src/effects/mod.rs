//! Audio effects processing
//!
//! A trait-based effect chain over mono f32 frames. The stylizer runs two
//! effects in series on its output stream:
//! - **MultiBandEq**: peaking/high-shelf cascade configured from band gains
//! - **Watermark**: fixed low-level tone burst at a fixed stream offset

mod chain;
mod eq;
mod watermark;

pub use chain::{AudioEffect, EffectChain, STREAM_FRAME_SIZE};
pub use eq::{EqBand, FilterType, MultiBandEq, PEAKING_Q, SHELF_Q};
pub use watermark::{
    Watermark, WatermarkSpec, WATERMARK_DURATION_SECS, WATERMARK_FREQUENCIES_HZ,
    WATERMARK_LEVEL_DB, WATERMARK_START_SECS,
};
