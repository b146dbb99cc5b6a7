//! Stage timing hooks
//!
//! The dispatcher reports each completed capability call to a
//! `StageObserver`. The default observer logs through `tracing`;
//! `RecordingObserver` keeps the reports for inspection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// A single capability call made by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Upsample,
    Denoise,
}

impl Stage {
    /// Past-tense summary used in log lines
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Upsample => "Audio upsampled to 48kHz",
            Self::Denoise => "Audio denoised",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upsample => write!(f, "upsample"),
            Self::Denoise => write!(f, "denoise"),
        }
    }
}

/// Receives a report each time a stage finishes successfully
pub trait StageObserver: Send + Sync {
    fn stage_completed(&self, stage: Stage, elapsed: Duration);
}

/// Writes one `info` event per completed stage
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn stage_completed(&self, stage: Stage, elapsed: Duration) {
        info!(
            stage = %stage,
            elapsed_ms = elapsed.as_millis() as u64,
            "{} in {:.3} seconds",
            stage.summary(),
            elapsed.as_secs_f64()
        );
    }
}

/// Keeps every report in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<(Stage, Duration)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(Stage, Duration)> {
        self.reports
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Stages in the order they completed
    pub fn stages(&self) -> Vec<Stage> {
        self.reports().into_iter().map(|(stage, _)| stage).collect()
    }
}

impl StageObserver for RecordingObserver {
    fn stage_completed(&self, stage: Stage, elapsed: Duration) {
        let mut reports = self
            .reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        reports.push((stage, elapsed));
    }
}
