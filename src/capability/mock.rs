//! Mock capability implementations for testing
//!
//! These don't contact any service. Each call is appended to a shared
//! `CallLog` and answered with a derived output location, so tests can
//! check call order and the artifact flowing between stages.

use super::model::{CapabilityInfo, Denoiser, Upsampler};
use crate::audio::AudioArtifact;
use crate::error::{EnhancerError, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded capability invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCall {
    Upsample { input: AudioArtifact, steps: i64 },
    Denoise { input: AudioArtifact },
}

/// Shared, ordered record of mock invocations
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<CapabilityCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<CapabilityCall>> {
        // A test that panicked mid-push still leaves a usable log.
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, call: CapabilityCall) {
        self.guard().push(call);
    }

    /// Snapshot of all calls so far, oldest first
    pub fn calls(&self) -> Vec<CapabilityCall> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

/// Insert `suffix` before the extension: `a/b.wav` -> `a/b_suffix.wav`
fn derived_location(input: &AudioArtifact, suffix: &str) -> AudioArtifact {
    match input.location().rsplit_once('.') {
        Some((stem, ext)) => AudioArtifact::new(format!("{}_{}.{}", stem, suffix, ext)),
        None => AudioArtifact::new(format!("{}_{}", input.location(), suffix)),
    }
}

/// Mock upsampler
pub struct MockUpsampler {
    info: CapabilityInfo,
    log: CallLog,
    output: Option<AudioArtifact>,
    failure: Option<String>,
}

impl MockUpsampler {
    pub fn new(log: CallLog) -> Self {
        Self {
            info: CapabilityInfo::new(
                "audiosr",
                "mock",
                "Upsamples audio to 48kHz (MOCK)",
            ),
            log,
            output: None,
            failure: None,
        }
    }

    /// Always return `output` instead of a derived location
    pub fn with_output(mut self, output: impl Into<AudioArtifact>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Record the call, then fail with `CapabilityFailed`
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }
}

impl Upsampler for MockUpsampler {
    fn info(&self) -> &CapabilityInfo {
        &self.info
    }

    fn upsample(&self, audio: &AudioArtifact, steps: i64) -> Result<AudioArtifact> {
        self.log.record(CapabilityCall::Upsample {
            input: audio.clone(),
            steps,
        });

        if let Some(reason) = &self.failure {
            return Err(EnhancerError::CapabilityFailed {
                id: self.info.name.clone(),
                reason: reason.clone(),
            });
        }

        Ok(self
            .output
            .clone()
            .unwrap_or_else(|| derived_location(audio, "upsampled")))
    }
}

/// Mock denoiser
pub struct MockDenoiser {
    info: CapabilityInfo,
    log: CallLog,
    output: Option<AudioArtifact>,
    failure: Option<String>,
}

impl MockDenoiser {
    pub fn new(log: CallLog) -> Self {
        Self {
            info: CapabilityInfo::new(
                "deepfilternet_v2",
                "mock",
                "Removes background noise (MOCK)",
            ),
            log,
            output: None,
            failure: None,
        }
    }

    /// Always return `output` instead of a derived location
    pub fn with_output(mut self, output: impl Into<AudioArtifact>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Record the call, then fail with `CapabilityFailed`
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }
}

impl Denoiser for MockDenoiser {
    fn info(&self) -> &CapabilityInfo {
        &self.info
    }

    fn denoise(&self, audio: &AudioArtifact) -> Result<AudioArtifact> {
        self.log.record(CapabilityCall::Denoise {
            input: audio.clone(),
        });

        if let Some(reason) = &self.failure {
            return Err(EnhancerError::CapabilityFailed {
                id: self.info.name.clone(),
                reason: reason.clone(),
            });
        }

        Ok(self
            .output
            .clone()
            .unwrap_or_else(|| derived_location(audio, "denoised")))
    }
}
