//! CLI Module
//!
//! Command-line interface for the audio enhancer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::dispatcher::{DEFAULT_MODE, DEFAULT_STEPS};

/// Audio Enhancer - upsample and denoise audio through hosted models
#[derive(Parser, Debug)]
#[command(name = "audio-enhancer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enhance a single audio file or URI
    #[command(name = "enhance")]
    Enhance {
        /// Audio path or URI (mp3 or wav)
        audio: String,

        /// One of: upsample, noise, all
        #[arg(short, long, default_value = DEFAULT_MODE)]
        mode: String,

        /// Enhancement steps for the upsampler (nominally 10-150)
        #[arg(short, long, default_value_t = DEFAULT_STEPS, allow_negative_numbers = true)]
        steps: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enhance every mp3/wav file under a directory
    #[command(name = "batch")]
    Batch {
        /// Directory to scan recursively
        dir: PathBuf,

        /// One of: upsample, noise, all
        #[arg(short, long, default_value = DEFAULT_MODE)]
        mode: String,

        /// Enhancement steps for the upsampler (nominally 10-150)
        #[arg(short, long, default_value_t = DEFAULT_STEPS, allow_negative_numbers = true)]
        steps: i64,
    },

    /// Print the function description and service reachability as JSON
    #[command(name = "describe")]
    Describe,
}

/// Log filter for the binary: `--verbose` forces `debug`, otherwise
/// `RUST_LOG` applies, falling back to `info`.
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
