//! Service configuration
//!
//! Endpoints and timeout for the hosted capabilities, read from the
//! environment.

use crate::error::{EnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const UPSAMPLER_URL_VAR: &str = "ENHANCER_UPSAMPLER_URL";
pub const DENOISER_URL_VAR: &str = "ENHANCER_DENOISER_URL";
pub const TIMEOUT_MS_VAR: &str = "ENHANCER_TIMEOUT_MS";

const DEFAULT_UPSAMPLER_URL: &str = "http://localhost:8010";
const DEFAULT_DENOISER_URL: &str = "http://localhost:8011";
const DEFAULT_TIMEOUT_MS: u64 = 600_000; // 10 minutes; upsampling at 150 steps is slow

/// Where the hosted services live and how long to wait for them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancerConfig {
    pub upsampler_url: String,
    pub denoiser_url: String,
    pub timeout_ms: u64,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            upsampler_url: DEFAULT_UPSAMPLER_URL.to_string(),
            denoiser_url: DEFAULT_DENOISER_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EnhancerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration with explicit endpoints
    pub fn with_urls(upsampler_url: String, denoiser_url: String, timeout_ms: u64) -> Self {
        Self {
            upsampler_url,
            denoiser_url,
            timeout_ms,
        }
    }

    /// Build from any key lookup; unset or empty keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_ms = match get(TIMEOUT_MS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| EnhancerError::InvalidConfig {
                    key: TIMEOUT_MS_VAR.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => defaults.timeout_ms,
        };

        Ok(Self {
            upsampler_url: get(UPSAMPLER_URL_VAR).unwrap_or(defaults.upsampler_url),
            denoiser_url: get(DENOISER_URL_VAR).unwrap_or(defaults.denoiser_url),
            timeout_ms,
        })
    }
}
