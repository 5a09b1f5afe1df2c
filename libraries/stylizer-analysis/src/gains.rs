//! Bounded per-band gains
//!
//! The reference/source energy ratio of each band is clamped, converted to
//! dB, clamped again and finally scaled by the style amount. Both clamps
//! always apply, so no style amount can push a band past
//! `MAX_STYLE_AMOUNT * MAX_BAND_GAIN_DB`.

use stylizer_core::{BandEnergyVector, GainVector, BAND_COUNT};

/// Upper bound of the style amount
pub const MAX_STYLE_AMOUNT: f32 = 0.6;

/// Default style amount
pub const DEFAULT_STYLE_AMOUNT: f32 = 0.35;

/// Lower bound of a band's reference/source energy ratio
pub const MIN_ENERGY_RATIO: f32 = 0.5;

/// Upper bound of a band's reference/source energy ratio
pub const MAX_ENERGY_RATIO: f32 = 1.5;

/// Per-band target bound in dB, before scaling by the style amount
pub const MAX_BAND_GAIN_DB: f32 = 1.5;

/// Band energies below this are treated as this value
const ENERGY_FLOOR: f32 = 1e-6;

/// Clamp a style amount into `[0, MAX_STYLE_AMOUNT]`; NaN becomes 0
pub fn clamp_style_amount(amount: f32) -> f32 {
    if amount.is_nan() {
        0.0
    } else {
        amount.clamp(0.0, MAX_STYLE_AMOUNT)
    }
}

/// Unscaled target gain in dB for one band
fn target_db(source: f32, reference: f32) -> f32 {
    // f32::max drops NaN, so non-finite energies are caught before flooring
    let ratio = if source.is_finite() && reference.is_finite() {
        reference.max(ENERGY_FLOOR) / source.max(ENERGY_FLOOR)
    } else {
        1.0
    };
    let ratio = ratio.clamp(MIN_ENERGY_RATIO, MAX_ENERGY_RATIO);
    (20.0 * ratio.log10()).clamp(-MAX_BAND_GAIN_DB, MAX_BAND_GAIN_DB)
}

/// Gains that move `source` toward `reference` by `style_amount`
pub fn compute_band_gains(
    source: &BandEnergyVector,
    reference: &BandEnergyVector,
    style_amount: f32,
) -> GainVector {
    let amount = clamp_style_amount(style_amount);
    let src = source.energies();
    let reference = reference.energies();

    let gains: [f32; BAND_COUNT] =
        std::array::from_fn(|i| amount * target_db(src[i], reference[i]));

    tracing::debug!("Band gains (amount {:.2}): {:?} dB", amount, gains);
    GainVector::new(gains)
}
