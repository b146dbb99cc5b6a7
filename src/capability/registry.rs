//! Capability registry
//!
//! Holds the upsamplers and denoisers a dispatcher can resolve by
//! identifier. The registry is an owned value handed to the dispatcher,
//! so each dispatcher sees exactly the capabilities it was built with.

use super::http::{HttpDenoiser, HttpUpsampler};
use super::mock::{CallLog, MockDenoiser, MockUpsampler};
use super::model::{CapabilityInfo, Denoiser, Upsampler};
use crate::config::EnhancerConfig;
use crate::error::{EnhancerError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier the dispatcher resolves its upsampler under
pub const UPSAMPLER_ID: &str = "upsampler";

/// Identifier the dispatcher resolves its denoiser under
pub const DENOISER_ID: &str = "denoiser";

/// Registry of available capabilities
#[derive(Default, Clone)]
pub struct CapabilityRegistry {
    upsamplers: HashMap<String, Arc<dyn Upsampler>>,
    denoisers: HashMap<String, Arc<dyn Denoiser>>,
}

impl CapabilityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry backed by the hosted HTTP services named in `config`
    pub fn with_http(config: &EnhancerConfig) -> Self {
        let mut registry = Self::new();
        registry.register_upsampler(
            UPSAMPLER_ID,
            Arc::new(HttpUpsampler::new(
                config.upsampler_url.clone(),
                config.timeout_ms,
            )),
        );
        registry.register_denoiser(
            DENOISER_ID,
            Arc::new(HttpDenoiser::new(
                config.denoiser_url.clone(),
                config.timeout_ms,
            )),
        );
        registry
    }

    /// Registry backed by mocks that record into `log`
    pub fn with_mocks(log: &CallLog) -> Self {
        let mut registry = Self::new();
        registry.register_upsampler(UPSAMPLER_ID, Arc::new(MockUpsampler::new(log.clone())));
        registry.register_denoiser(DENOISER_ID, Arc::new(MockDenoiser::new(log.clone())));
        registry
    }

    /// Register an upsampler, replacing any previous one under `id`
    pub fn register_upsampler(&mut self, id: &str, upsampler: Arc<dyn Upsampler>) {
        self.upsamplers.insert(id.to_string(), upsampler);
    }

    /// Register a denoiser, replacing any previous one under `id`
    pub fn register_denoiser(&mut self, id: &str, denoiser: Arc<dyn Denoiser>) {
        self.denoisers.insert(id.to_string(), denoiser);
    }

    /// Get an upsampler by ID
    pub fn upsampler(&self, id: &str) -> Result<Arc<dyn Upsampler>> {
        self.upsamplers
            .get(id)
            .cloned()
            .ok_or_else(|| EnhancerError::CapabilityNotFound { id: id.to_string() })
    }

    /// Get a denoiser by ID
    pub fn denoiser(&self, id: &str) -> Result<Arc<dyn Denoiser>> {
        self.denoisers
            .get(id)
            .cloned()
            .ok_or_else(|| EnhancerError::CapabilityNotFound { id: id.to_string() })
    }

    pub fn has_upsampler(&self, id: &str) -> bool {
        self.upsamplers.contains_key(id)
    }

    pub fn has_denoiser(&self, id: &str) -> bool {
        self.denoisers.contains_key(id)
    }

    /// Describe every registered capability, upsamplers first.
    ///
    /// Calls `is_available` on each one, which for HTTP capabilities means
    /// a health request per service.
    pub fn statuses(&self) -> Vec<CapabilityStatus> {
        let mut upsamplers: Vec<_> = self
            .upsamplers
            .iter()
            .map(|(id, c)| {
                CapabilityStatus::new(id, CapabilityKind::Upsampler, c.info(), c.is_available())
            })
            .collect();
        upsamplers.sort_by(|a, b| a.id.cmp(&b.id));

        let mut denoisers: Vec<_> = self
            .denoisers
            .iter()
            .map(|(id, c)| {
                CapabilityStatus::new(id, CapabilityKind::Denoiser, c.info(), c.is_available())
            })
            .collect();
        denoisers.sort_by(|a, b| a.id.cmp(&b.id));

        upsamplers.extend(denoisers);
        upsamplers
    }
}

/// Which trait a registered capability implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Upsampler,
    Denoiser,
}

/// A registered capability and whether it answered its health check
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityStatus {
    pub id: String,
    pub kind: CapabilityKind,
    #[serde(flatten)]
    pub info: CapabilityInfo,
    pub available: bool,
}

impl CapabilityStatus {
    fn new(id: &str, kind: CapabilityKind, info: &CapabilityInfo, available: bool) -> Self {
        Self {
            id: id.to_string(),
            kind,
            info: info.clone(),
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_mocks() {
        let registry = CapabilityRegistry::with_mocks(&CallLog::new());

        assert!(registry.has_upsampler(UPSAMPLER_ID));
        assert!(registry.has_denoiser(DENOISER_ID));
    }

    #[test]
    fn test_statuses_order_and_availability() {
        let log = CallLog::new();
        let mut registry = CapabilityRegistry::with_mocks(&log);
        registry.register_upsampler("upsampler-hq", Arc::new(MockUpsampler::new(log.clone())));

        let statuses = registry.statuses();
        let ids: Vec<_> = statuses.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["upsampler", "upsampler-hq", "denoiser"]);
        assert_eq!(statuses[2].kind, CapabilityKind::Denoiser);
        assert!(statuses.iter().all(|s| s.available));
        assert!(log.is_empty());
    }

    #[test]
    fn test_status_json_shape() {
        let registry = CapabilityRegistry::with_mocks(&CallLog::new());
        let json = serde_json::to_value(&registry.statuses()[0]).unwrap();

        assert_eq!(json["id"], "upsampler");
        assert_eq!(json["kind"], "upsampler");
        assert_eq!(json["name"], "audiosr");
        assert_eq!(json["available"], true);
    }

    #[test]
    fn test_get_missing_capability() {
        let registry = CapabilityRegistry::new();

        let err = registry.upsampler(UPSAMPLER_ID).err().unwrap();
        assert!(matches!(err, EnhancerError::CapabilityNotFound { ref id } if id == "upsampler"));
        assert!(registry.denoiser(DENOISER_ID).is_err());
    }

    #[test]
    fn test_ids_are_separate_namespaces() {
        let log = CallLog::new();
        let mut registry = CapabilityRegistry::new();
        registry.register_denoiser(UPSAMPLER_ID, Arc::new(MockDenoiser::new(log)));

        assert!(registry.denoiser(UPSAMPLER_ID).is_ok());
        assert!(registry.upsampler(UPSAMPLER_ID).is_err());
    }

    #[test]
    fn test_with_http_registers_both() {
        let registry = CapabilityRegistry::with_http(&EnhancerConfig::default());

        let upsampler = registry.upsampler(UPSAMPLER_ID).unwrap();
        assert_eq!(upsampler.info().name, "audiosr");
        let denoiser = registry.denoiser(DENOISER_ID).unwrap();
        assert_eq!(denoiser.info().name, "deepfilternet_v2");
    }
}
