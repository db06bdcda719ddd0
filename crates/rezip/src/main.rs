use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rezip_archive::{repackage, validate};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{App, Config, InPhase, Phase, PhaseError};

mod cli;

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(&app.log_level);

    match run(&app) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::FAILURE
        }
    }
}

fn run(app: &App) -> Result<String, PhaseError> {
    let config = Config::try_from(app).phase(Phase::Arguments)?;
    tracing::debug!(?config, "arguments accepted");

    let registry = repackage(&config.input, &config.output).phase(Phase::Repackaging)?;

    if let Some(path) = &config.registry {
        registry
            .save(path)
            .with_context(|| format!("failed to save registry to {}", path.display()))
            .phase(Phase::Repackaging)?;
    }

    if !config.validate {
        return Ok(format!(
            "Successfully repackaged {} to {}.",
            config.input.display(),
            config.output.display()
        ));
    }

    let outcome = validate(&config.output, &registry).phase(Phase::Validation)?;

    Ok(format!(
        "Successfully repackaged {} to {} and performed validation. Validation status: {}",
        config.input.display(),
        config.output.display(),
        outcome.all_match()
    ))
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
