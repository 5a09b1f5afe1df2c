/// Pipeline error types
use crate::config::ConfigError;
use crate::consent::ConsentError;
use std::fmt;
use stylizer_analysis::AnalysisError;
use stylizer_audio::AudioError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ConsentCheck,
    IngestSource,
    IngestReference,
    ExtractFeatures,
    SimilarityGuard,
    BandEnergy,
    ComputeGains,
    StreamProcess,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConsentCheck => "consent check",
            Self::IngestSource => "source ingestion",
            Self::IngestReference => "reference ingestion",
            Self::ExtractFeatures => "feature extraction",
            Self::SimilarityGuard => "similarity guard",
            Self::BandEnergy => "band energy estimation",
            Self::ComputeGains => "gain computation",
            Self::StreamProcess => "stream processing",
            Self::Write => "output write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Consent(#[from] ConsentError),

    #[error("{stage} failed: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: AudioError,
    },

    #[error("{stage} failed: {source}")]
    Analysis {
        stage: Stage,
        #[source]
        source: AnalysisError,
    },

    #[error("[Guard] Similarity {similarity:.3} >= cap {cap:.2}. Refusing to avoid 1:1 replication.")]
    GuardRefusal { similarity: f32, cap: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Attach a stage to an audio failure
    pub fn io(stage: Stage, source: AudioError) -> Self {
        Self::Io { stage, source }
    }

    /// Attach a stage to an analysis failure; refusals keep their own variant
    pub fn analysis(stage: Stage, source: AnalysisError) -> Self {
        match source {
            AnalysisError::GuardRefusal { similarity, cap } => {
                Self::GuardRefusal { similarity, cap }
            }
            AnalysisError::InvalidCap(_) => {
                Self::Config(ConfigError::Invalid(source.to_string()))
            }
            AnalysisError::InvalidSampleRate(_) => Self::Analysis { stage, source },
        }
    }

    /// Process exit status for this error
    ///
    /// 2 is left to clap's usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Io { .. } | Self::Analysis { .. } => 1,
            Self::Consent(_) => 3,
            Self::GuardRefusal { .. } => 4,
            Self::Config(_) => 5,
        }
    }
}
