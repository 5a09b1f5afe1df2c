//! Stylizer
//!
//! Consent-gated voice stylizer. Nudges the tonal balance of a source
//! recording a small, bounded amount toward a reference speaker, refuses
//! outright when the two already sound too alike, and marks every output
//! with a quiet watermark burst.
//!
//! The binary is a thin wrapper around [`pipeline::run`]; everything it does
//! is reachable from this library for testing.

pub mod config;
pub mod consent;
pub mod error;
pub mod integrity;
pub mod pipeline;

pub use config::{ConfigError, ConfigOverrides, StylizerConfig, StylizerSettings};
pub use consent::{require_consent, ConsentError};
pub use error::{PipelineError, Result, Stage};
pub use integrity::{executable_digest, sha256_file};
pub use pipeline::{run, PipelineReport, PipelineRequest};
