//! Audio enhancement dispatcher
//!
//! Validates a request, resolves the upsampler and denoiser, and runs one
//! or both of them depending on the mode:
//!
//! - `upsample`: upsampler(audio, steps)
//! - `noise`: denoiser(audio)
//! - `all`: denoiser(upsampler(audio, steps))
//!
//! Capability errors are returned exactly as the capability produced them.
//! Nothing is retried.

use crate::audio::{AudioArtifact, EnhanceMode};
use crate::capability::{CapabilityRegistry, DENOISER_ID, UPSAMPLER_ID};
use crate::error::Result;
use crate::observe::{LogObserver, Stage, StageObserver};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Mode used when the caller does not pick one
pub const DEFAULT_MODE: &str = "all";

/// Step count used when the caller does not pick one
pub const DEFAULT_STEPS: i64 = 50;

/// Step counts the upsampler is documented to accept. Not enforced here.
pub const NOMINAL_STEPS: RangeInclusive<i64> = 10..=150;

/// A single enhancement call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub audio: AudioArtifact,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_steps")]
    pub steps: i64,
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

fn default_steps() -> i64 {
    DEFAULT_STEPS
}

impl EnhanceRequest {
    /// Request with the default mode and step count
    pub fn new(audio: impl Into<AudioArtifact>) -> Self {
        Self {
            audio: audio.into(),
            mode: default_mode(),
            steps: DEFAULT_STEPS,
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_string();
        self
    }

    pub fn with_steps(mut self, steps: i64) -> Self {
        self.steps = steps;
        self
    }
}

/// Routes audio through the registered capabilities
pub struct Dispatcher {
    registry: CapabilityRegistry,
    observer: Arc<dyn StageObserver>,
}

impl Dispatcher {
    /// Create a dispatcher that logs stage timings through `tracing`
    pub fn new(registry: CapabilityRegistry) -> Self {
        Self {
            registry,
            observer: Arc::new(LogObserver),
        }
    }

    /// Replace the stage observer
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Run a request
    pub fn run(&self, request: &EnhanceRequest) -> Result<AudioArtifact> {
        self.enhance(&request.audio, &request.mode, request.steps)
    }

    /// Enhance `audio` according to `mode`, returning the final artifact
    pub fn enhance(&self, audio: &AudioArtifact, mode: &str, steps: i64) -> Result<AudioArtifact> {
        audio.format()?;
        let mode = EnhanceMode::parse(mode)?;

        if mode.upsamples() && !NOMINAL_STEPS.contains(&steps) {
            warn!(
                steps,
                "enhancement steps outside {}..={}, passing through unchanged",
                NOMINAL_STEPS.start(),
                NOMINAL_STEPS.end()
            );
        }

        let upsampler = self.registry.upsampler(UPSAMPLER_ID)?;
        let denoiser = self.registry.denoiser(DENOISER_ID)?;

        debug!(audio = %audio, mode = %mode, steps, "dispatching enhancement");

        match mode {
            EnhanceMode::Upsample => {
                self.timed(Stage::Upsample, || upsampler.upsample(audio, steps))
            }
            EnhanceMode::Noise => self.timed(Stage::Denoise, || denoiser.denoise(audio)),
            EnhanceMode::All => {
                let upsampled = self.timed(Stage::Upsample, || upsampler.upsample(audio, steps))?;
                self.timed(Stage::Denoise, || denoiser.denoise(&upsampled))
            }
        }
    }

    /// Run `call`, reporting its duration only if it succeeds
    fn timed<F>(&self, stage: Stage, call: F) -> Result<AudioArtifact>
    where
        F: FnOnce() -> Result<AudioArtifact>,
    {
        let start = Instant::now();
        let output = call()?;
        self.observer.stage_completed(stage, start.elapsed());
        Ok(output)
    }
}
