//! Audio Enhancer - upsampling and denoising dispatch
//!
//! Routes an audio file to hosted inference services and returns the
//! enhanced result. Two services are involved:
//! 1. Upsampler - super-resolution toward 48kHz, tuned by a step count
//! 2. Denoiser - background noise removal
//!
//! # Modes
//!
//! - `upsample`: upsampler only
//! - `noise`: denoiser only
//! - `all`: upsampler, then denoiser on the upsampled output
//!
//! # Example
//!
//! ```
//! use audio_enhancer::{AudioArtifact, CallLog, CapabilityRegistry, Dispatcher};
//!
//! let log = CallLog::new();
//! let dispatcher = Dispatcher::new(CapabilityRegistry::with_mocks(&log));
//!
//! let out = dispatcher
//!     .enhance(&AudioArtifact::new("clip.mp3"), "Noise", 50)
//!     .unwrap();
//! assert_eq!(out.location(), "clip_denoised.mp3");
//! assert_eq!(log.len(), 1);
//! ```

pub mod audio;
pub mod capability;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod metadata;
pub mod observe;

pub use audio::{AudioArtifact, AudioFormat, EnhanceMode};
pub use capability::{
    CallLog, CapabilityCall, CapabilityRegistry, Denoiser, MockDenoiser, MockUpsampler, Upsampler,
};
pub use config::EnhancerConfig;
pub use dispatcher::{Dispatcher, EnhanceRequest};
pub use error::{EnhancerError, Result};
pub use observe::{LogObserver, RecordingObserver, Stage, StageObserver};
