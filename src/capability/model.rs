//! Capability traits and core types
//!
//! Defines the interface the hosted upsampling and denoising services are
//! reached through.

use crate::audio::AudioArtifact;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an external capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityInfo {
    /// Service name as the host knows it (e.g., "audiosr")
    pub name: String,

    /// Service version, if known
    pub version: String,

    /// What the service does
    pub description: String,
}

impl CapabilityInfo {
    pub fn new(name: &str, version: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
        }
    }
}

/// Super-resolution service that upsamples audio toward a higher sample rate
pub trait Upsampler: Send + Sync {
    /// Get capability information
    fn info(&self) -> &CapabilityInfo;

    /// Upsample `audio` using `steps` enhancement steps.
    ///
    /// `steps` is forwarded as given; range checking is the service's job.
    fn upsample(&self, audio: &AudioArtifact, steps: i64) -> Result<AudioArtifact>;

    /// Check if the capability is ready to use
    fn is_available(&self) -> bool {
        true
    }
}

/// Noise reduction service
pub trait Denoiser: Send + Sync {
    /// Get capability information
    fn info(&self) -> &CapabilityInfo;

    /// Remove background noise from `audio`
    fn denoise(&self, audio: &AudioArtifact) -> Result<AudioArtifact>;

    /// Check if the capability is ready to use
    fn is_available(&self) -> bool {
        true
    }
}
