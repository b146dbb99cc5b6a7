//! Audio artifacts and enhancement modes
//!
//! An artifact is only a location plus the format tag read off its
//! extension. Nothing here opens the file.

use crate::error::{EnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Reference to an audio resource: a file path or a URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioArtifact {
    location: String,
}

impl AudioArtifact {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy().to_string())
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Everything after the final `.`, or the whole location if there is none
    pub fn format_tag(&self) -> &str {
        self.location
            .rsplit_once('.')
            .map(|(_, tag)| tag)
            .unwrap_or(&self.location)
    }

    /// Resolve the format tag to a supported format
    pub fn format(&self) -> Result<AudioFormat> {
        self.format_tag().parse()
    }
}

impl fmt::Display for AudioArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

impl From<&str> for AudioArtifact {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}

impl From<String> for AudioArtifact {
    fn from(location: String) -> Self {
        Self::new(location)
    }
}

/// Container formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 2] = [AudioFormat::Mp3, AudioFormat::Wav];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = EnhancerError;

    // Exact match: "WAV" is rejected.
    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            other => Err(EnhancerError::InvalidFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Which services an enhancement call goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceMode {
    /// Upsampler only
    Upsample,
    /// Denoiser only
    Noise,
    /// Upsampler, then denoiser on the upsampled output
    #[default]
    All,
}

impl EnhanceMode {
    pub const ALL: [EnhanceMode; 3] = [EnhanceMode::Upsample, EnhanceMode::Noise, EnhanceMode::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upsample => "upsample",
            Self::Noise => "noise",
            Self::All => "all",
        }
    }

    /// Trims and lower-cases before matching
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "upsample" => Ok(Self::Upsample),
            "noise" => Ok(Self::Noise),
            "all" => Ok(Self::All),
            _ => Err(EnhancerError::InvalidMode {
                mode: raw.to_string(),
            }),
        }
    }

    pub fn upsamples(&self) -> bool {
        matches!(self, Self::Upsample | Self::All)
    }
}

impl fmt::Display for EnhanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnhanceMode {
    type Err = EnhancerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
