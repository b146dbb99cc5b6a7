//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::audio::{AudioArtifact, EnhanceMode};
use crate::capability::{CapabilityRegistry, CapabilityStatus};
use crate::config::EnhancerConfig;
use crate::dispatcher::{Dispatcher, EnhanceRequest};
use crate::error::{EnhancerError, Result};
use crate::metadata::FunctionMetadata;

/// Dispatcher wired to the hosted services from the environment.
pub fn remote_dispatcher() -> Result<Dispatcher> {
    let config = EnhancerConfig::from_env()?;
    info!(
        upsampler = %config.upsampler_url,
        denoiser = %config.denoiser_url,
        timeout_ms = config.timeout_ms,
        "Using hosted capabilities"
    );
    Ok(Dispatcher::new(CapabilityRegistry::with_http(&config)))
}

#[derive(Debug, Serialize)]
struct EnhanceReport<'a> {
    input: &'a AudioArtifact,
    output: &'a AudioArtifact,
    mode: EnhanceMode,
    steps: i64,
}

/// Enhance a single file and print where the result is.
pub fn enhance(dispatcher: &Dispatcher, audio: &str, mode: &str, steps: i64, json: bool) -> Result<()> {
    let request = EnhanceRequest::new(audio).with_mode(mode).with_steps(steps);
    let output = dispatcher.run(&request)?;

    if json {
        let report = EnhanceReport {
            input: &request.audio,
            output: &output,
            mode: EnhanceMode::parse(&request.mode)?,
            steps,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<(PathBuf, AudioArtifact)>,
    pub failed: Vec<(PathBuf, EnhancerError)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of scanning a directory tree for audio files
#[derive(Debug, Default)]
pub struct AudioScan {
    /// Files with an mp3 or wav format tag, in walk order
    pub files: Vec<PathBuf>,
    /// Entries that could not be read, with the reason
    pub unreadable: Vec<(PathBuf, EnhancerError)>,
}

/// Walk `dir` (following symlinks) for mp3/wav files, sorted by name.
///
/// Entries that fail to read are collected instead of ending the walk.
pub fn collect_audio_files(dir: &Path) -> AudioScan {
    let mut scan = AudioScan::default();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                warn!("Skipping unreadable entry {}: {}", path.display(), e);
                scan.unreadable.push((path, EnhancerError::Io(std::io::Error::from(e))));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if AudioArtifact::from_path(entry.path()).format().is_ok() {
            scan.files.push(entry.into_path());
        }
    }

    scan
}

/// Enhance every audio file under `dir`, continuing past per-file failures.
///
/// Unreadable entries are reported as failures alongside files the
/// dispatcher rejected.
pub fn batch(dispatcher: &Dispatcher, dir: &Path, mode: &str, steps: i64) -> Result<BatchSummary> {
    if !dir.is_dir() {
        return Err(EnhancerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        )));
    }

    let scan = collect_audio_files(dir);
    info!("Found {} audio files in {}", scan.files.len(), dir.display());

    let mut summary = BatchSummary::default();
    for (path, e) in scan.unreadable {
        println!("{} FAILED [{}] {}", path.display(), e.error_code(), e);
        summary.failed.push((path, e));
    }

    for path in scan.files {
        let audio = AudioArtifact::from_path(&path);
        match dispatcher.enhance(&audio, mode, steps) {
            Ok(output) => {
                println!("{} -> {}", path.display(), output);
                summary.succeeded.push((path, output));
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                println!("{} FAILED [{}] {}", path.display(), e.error_code(), e);
                summary.failed.push((path, e));
            }
        }
    }

    println!(
        "{} of {} files enhanced",
        summary.succeeded.len(),
        summary.total()
    );

    Ok(summary)
}

#[derive(Debug, Serialize)]
struct Description {
    function: FunctionMetadata,
    capabilities: Vec<CapabilityStatus>,
}

/// Print the function description and whether each registered service answers its health check.
pub fn describe(dispatcher: &Dispatcher) -> Result<()> {
    let description = Description {
        function: FunctionMetadata::current(),
        capabilities: dispatcher.registry().statuses(),
    };
    for status in description.capabilities.iter().filter(|s| !s.available) {
        warn!("Capability '{}' ({}) is not reachable", status.id, status.info.name);
    }

    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}
