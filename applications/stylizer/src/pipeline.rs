/// Stylization pipeline
///
/// Runs the stages strictly in order and stops at the first failure:
///
/// ```text
/// consent → ingest source → ingest reference → cepstral profiles
///         → similarity guard → band energies → gains
///         → EQ + watermark (streamed) → 16-bit WAV
/// ```
///
/// Nothing is written unless every stage before the write succeeds. The
/// analysis buffers are left as ingested; EQ and watermark run over a
/// separate output buffer.
use crate::config::StylizerSettings;
use crate::consent::require_consent;
use crate::error::{PipelineError, Result, Stage};
use std::path::PathBuf;
use stylizer_analysis::{band_energies, compute_band_gains, extract_profile, SimilarityGuard};
use stylizer_audio::effects::{EffectChain, MultiBandEq, Watermark, STREAM_FRAME_SIZE};
use stylizer_audio::{load_mono, write_pcm16};
use stylizer_core::{GainVector, ANALYSIS_SAMPLE_RATE};

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub source: PathBuf,
    pub reference: PathBuf,
    pub out: PathBuf,
    pub consent: PathBuf,
    pub settings: StylizerSettings,
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub similarity: f32,
    pub similarity_cap: f32,
    pub style_amount: f32,
    pub gains: GainVector,
    pub output: PathBuf,
    pub samples_written: usize,
    pub duration_secs: f64,
}

/// Run the whole pipeline for `request`
pub fn run(request: &PipelineRequest) -> Result<PipelineReport> {
    let settings = request.settings;

    tracing::info!("Stage: {}", Stage::ConsentCheck);
    require_consent(&request.consent)?;

    if settings.offline {
        tracing::info!("Offline mode requested; no network access is used either way");
    }

    let sr = ANALYSIS_SAMPLE_RATE;

    tracing::info!("Stage: {}", Stage::IngestSource);
    let source = load_mono(&request.source, sr)
        .map_err(|e| PipelineError::io(Stage::IngestSource, e))?;

    tracing::info!("Stage: {}", Stage::IngestReference);
    let reference = load_mono(&request.reference, sr)
        .map_err(|e| PipelineError::io(Stage::IngestReference, e))?;

    tracing::debug!(
        "Ingested source ({} samples) and reference ({} samples) at {} Hz",
        source.len(),
        reference.len(),
        sr.as_hz()
    );

    tracing::info!("Stage: {}", Stage::ExtractFeatures);
    let source_profile = extract_profile(&source)
        .map_err(|e| PipelineError::analysis(Stage::ExtractFeatures, e))?;
    let reference_profile = extract_profile(&reference)
        .map_err(|e| PipelineError::analysis(Stage::ExtractFeatures, e))?;

    tracing::info!("Stage: {}", Stage::SimilarityGuard);
    let guard = SimilarityGuard::new(settings.similarity_cap)
        .map_err(|e| PipelineError::analysis(Stage::SimilarityGuard, e))?;
    let similarity = guard
        .check(&source_profile, &reference_profile)
        .map_err(|e| PipelineError::analysis(Stage::SimilarityGuard, e))?;

    tracing::info!("Stage: {}", Stage::BandEnergy);
    let source_energy =
        band_energies(&source).map_err(|e| PipelineError::analysis(Stage::BandEnergy, e))?;
    let reference_energy =
        band_energies(&reference).map_err(|e| PipelineError::analysis(Stage::BandEnergy, e))?;

    tracing::info!("Stage: {}", Stage::ComputeGains);
    let gains = compute_band_gains(&source_energy, &reference_energy, settings.style_amount);
    tracing::info!("Target EQ gains (dB): {}", format_gains(&gains));

    tracing::info!("Stage: {}", Stage::StreamProcess);
    let mut output = source.clone();
    let mut chain = EffectChain::new();
    chain.add_effect(Box::new(MultiBandEq::from_gains(&gains, sr.as_hz())));
    chain.add_effect(Box::new(Watermark::standard(sr.as_hz())));
    let frames = chain.process_stream(&mut output.samples, STREAM_FRAME_SIZE, sr.as_hz());
    tracing::debug!("Processed {} frames of {} samples", frames, STREAM_FRAME_SIZE);

    tracing::info!("Stage: {}", Stage::Write);
    let samples_written =
        write_pcm16(&request.out, &output).map_err(|e| PipelineError::io(Stage::Write, e))?;
    tracing::info!("Wrote: {}", request.out.display());

    Ok(PipelineReport {
        similarity,
        similarity_cap: guard.cap(),
        style_amount: settings.style_amount,
        gains,
        output: request.out.clone(),
        samples_written,
        duration_secs: output.duration_secs(),
    })
}

fn format_gains(gains: &GainVector) -> String {
    gains
        .gains_db()
        .iter()
        .map(|g| format!("{:+.2}", g))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_are_formatted_with_sign() {
        let gains = GainVector::new([0.5, -0.25, 0.0, 0.9, -0.9]);
        assert_eq!(format_gains(&gains), "+0.50 -0.25 +0.00 +0.90 -0.90");
    }
}
