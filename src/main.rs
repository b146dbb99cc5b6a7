//! Audio Enhancer CLI
//!
//! Command-line interface for the audio enhancer.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use audio_enhancer::cli::{commands, log_filter, Cli, Commands};
use audio_enhancer::EnhancerError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    info!("Audio Enhancer v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(enhancer_err) = err.downcast_ref::<EnhancerError>() {
                for suggestion in enhancer_err.recovery_suggestions() {
                    eprintln!("  - {}", suggestion);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Enhance {
            audio,
            mode,
            steps,
            json,
        } => {
            let dispatcher = commands::remote_dispatcher()?;
            commands::enhance(&dispatcher, &audio, &mode, steps, json)
                .with_context(|| format!("enhancing {}", audio))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Batch { dir, mode, steps } => {
            let dispatcher = commands::remote_dispatcher()?;
            let summary = commands::batch(&dispatcher, &dir, &mode, steps)?;
            Ok(if summary.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Describe => {
            let dispatcher = commands::remote_dispatcher()?;
            commands::describe(&dispatcher)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
