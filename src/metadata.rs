//! Published description of the enhancement function

use crate::audio::{AudioFormat, EnhanceMode};
use crate::dispatcher::{DEFAULT_MODE, DEFAULT_STEPS, NOMINAL_STEPS};
use serde::Serialize;

/// What the function is called, what it accepts and what it defaults to
#[derive(Debug, Clone, Serialize)]
pub struct FunctionMetadata {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub tags: Vec<&'static str>,
    pub formats: Vec<AudioFormat>,
    pub modes: Vec<EnhanceMode>,
    pub default_mode: &'static str,
    pub default_steps: i64,
    pub min_steps: i64,
    pub max_steps: i64,
}

impl FunctionMetadata {
    pub fn current() -> Self {
        Self {
            name: "audio_enhancement",
            title: "Audio Enhancer",
            description: "Remove background noise from audio and upsample to 48kHz.",
            version: env!("CARGO_PKG_VERSION"),
            tags: vec!["Audio", "Speech", "Enhancement", "Featured"],
            formats: AudioFormat::ALL.to_vec(),
            modes: EnhanceMode::ALL.to_vec(),
            default_mode: DEFAULT_MODE,
            default_steps: DEFAULT_STEPS,
            min_steps: *NOMINAL_STEPS.start(),
            max_steps: *NOMINAL_STEPS.end(),
        }
    }
}
