/// Stylizer - consent-gated voice stylizer
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use stylizer::{
    config::{ConfigOverrides, StylizerConfig},
    executable_digest,
    pipeline::{self, PipelineRequest},
    PipelineError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stylizer")]
#[command(
    about = "Nudge a recording's tonal balance toward a consenting reference speaker",
    long_about = None
)]
struct Cli {
    /// Recording to stylize
    #[arg(long)]
    source: PathBuf,

    /// Reference speaker recording
    #[arg(long)]
    reference: PathBuf,

    /// Output WAV path
    #[arg(long)]
    out: PathBuf,

    /// Consent record (JSON) for the reference speaker
    #[arg(long)]
    consent: PathBuf,

    /// Refuse when cepstral similarity reaches this value
    #[arg(long)]
    similarity_cap: Option<f32>,

    /// How far to move toward the reference (clamped to 0.6)
    #[arg(long)]
    style_amount: Option<f32>,

    /// Accepted for compatibility; no network access is ever made
    #[arg(long)]
    offline: bool,

    /// Print the SHA-256 of this executable after a successful run
    #[arg(long)]
    verify: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stylizer=info,stylizer_audio=info,stylizer_analysis=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match stylize(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn stylize(cli: &Cli) -> Result<(), PipelineError> {
    let overrides = ConfigOverrides {
        similarity_cap: cli.similarity_cap,
        style_amount: cli.style_amount,
        offline: cli.offline,
    };
    let settings = StylizerConfig::load(cli.config.as_deref())?
        .with_overrides(&overrides)
        .validate()?;

    let request = PipelineRequest {
        source: cli.source.clone(),
        reference: cli.reference.clone(),
        out: cli.out.clone(),
        consent: cli.consent.clone(),
        settings,
    };

    let report = pipeline::run(&request)?;

    if cli.verify {
        verify();
    }

    tracing::info!(
        "Done: similarity {:.3} (cap {:.2}), style amount {:.2}, {} samples ({:.2}s) -> {}",
        report.similarity,
        report.similarity_cap,
        report.style_amount,
        report.samples_written,
        report.duration_secs,
        report.output.display()
    );

    Ok(())
}

fn verify() {
    match executable_digest() {
        Ok((path, digest)) => println!("SHA-256 {}  {}", digest, path.display()),
        Err(e) => tracing::warn!("Integrity check skipped: {:#}", e),
    }
}
