//! HTTP capability implementations
//!
//! Talks to the hosted upsampler and denoiser over a small JSON protocol:
//! `POST {base_url}/process` with a `ServiceRequest`, answered by a
//! `ServiceResponse`, plus `GET {base_url}/health` for availability.
//!
//! Requests are only sent when built with the `remote` feature.

use super::model::{CapabilityInfo, Denoiser, Upsampler};
use crate::audio::AudioArtifact;
use crate::error::{EnhancerError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body sent to a hosted service
#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    request_id: String,
    audio: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<i64>,
}

/// Response body returned by a hosted service
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    success: bool,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    processing_time_ms: Option<u64>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Turn a decoded response into the output artifact or a capability error
fn interpret_response(id: &str, response: ServiceResponse) -> Result<AudioArtifact> {
    if !response.success {
        return Err(EnhancerError::CapabilityFailed {
            id: id.to_string(),
            reason: response
                .error_message
                .unwrap_or_else(|| "Unknown service error".to_string()),
        });
    }

    if let Some(ms) = response.processing_time_ms {
        debug!(capability = id, processing_time_ms = ms, "service reported processing time");
    }

    match response.output {
        Some(output) if !output.is_empty() => Ok(AudioArtifact::new(output)),
        _ => Err(EnhancerError::MalformedResponse {
            id: id.to_string(),
            reason: "success reported without an output location".to_string(),
        }),
    }
}

/// Error body some services attach to non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_message: Option<String>,
}

/// Map a non-2xx response to `CapabilityUnavailable`, keeping the service's message if it sent one
fn status_error(id: &str, status: impl std::fmt::Display, body: &str) -> EnhancerError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .filter(|m| !m.is_empty());

    let reason = match message {
        Some(message) => format!("Service returned error: {}: {}", status, message),
        None => format!("Service returned error: {}", status),
    };
    EnhancerError::CapabilityUnavailable {
        id: id.to_string(),
        reason,
    }
}

fn parse_response(id: &str, body: &str) -> Result<AudioArtifact> {
    let response: ServiceResponse =
        serde_json::from_str(body).map_err(|e| EnhancerError::MalformedResponse {
            id: id.to_string(),
            reason: format!("Invalid response body: {}", e),
        })?;
    interpret_response(id, response)
}

/// Connection details for one hosted service
#[derive(Debug, Clone)]
struct ServiceEndpoint {
    base_url: String,
    timeout_ms: u64,
}

impl ServiceEndpoint {
    fn new(base_url: String, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    fn invoke(&self, id: &str, audio: &AudioArtifact, steps: Option<i64>) -> Result<AudioArtifact> {
        let request = ServiceRequest {
            request_id: uuid::Uuid::new_v4().to_string(),
            audio: audio.location(),
            steps,
        };
        debug!(
            capability = id,
            request_id = %request.request_id,
            audio = %audio,
            "dispatching request"
        );

        let body = self.send_request(id, &request)?;
        parse_response(id, &body)
    }

    /// Send request to the service, returning the raw response body
    #[cfg(feature = "remote")]
    fn send_request(&self, id: &str, request: &ServiceRequest<'_>) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| EnhancerError::CapabilityUnavailable {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        let url = format!("{}/process", self.base_url);

        let response = client.post(&url).json(request).send().map_err(|e| {
            if e.is_timeout() {
                EnhancerError::CapabilityTimeout {
                    id: id.to_string(),
                    timeout_ms: self.timeout_ms,
                }
            } else if e.is_connect() {
                EnhancerError::CapabilityUnavailable {
                    id: id.to_string(),
                    reason: format!("Cannot connect to {}: {}", self.base_url, e),
                }
            } else {
                EnhancerError::CapabilityFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(id, status, &body));
        }

        response.text().map_err(|e| {
            if e.is_timeout() {
                EnhancerError::CapabilityTimeout {
                    id: id.to_string(),
                    timeout_ms: self.timeout_ms,
                }
            } else {
                EnhancerError::MalformedResponse {
                    id: id.to_string(),
                    reason: format!("Unreadable response body: {}", e),
                }
            }
        })
    }

    #[cfg(not(feature = "remote"))]
    fn send_request(&self, id: &str, _request: &ServiceRequest<'_>) -> Result<String> {
        Err(EnhancerError::CapabilityUnavailable {
            id: id.to_string(),
            reason: "HTTP support not compiled. Build with --features remote".to_string(),
        })
    }

    /// Check if the service is reachable
    #[cfg(feature = "remote")]
    fn check_health(&self) -> bool {
        let client = match reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
        {
            Ok(client) => client,
            Err(_) => return false,
        };

        let url = format!("{}/health", self.base_url);
        match client.get(&url).send() {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    #[cfg(not(feature = "remote"))]
    fn check_health(&self) -> bool {
        false
    }
}

/// Hosted super-resolution service (AudioSR)
pub struct HttpUpsampler {
    info: CapabilityInfo,
    endpoint: ServiceEndpoint,
}

impl HttpUpsampler {
    pub fn new(base_url: String, timeout_ms: u64) -> Self {
        Self {
            info: CapabilityInfo::new(
                "audiosr",
                "remote",
                "Audio super-resolution: upsamples audio to 48kHz",
            ),
            endpoint: ServiceEndpoint::new(base_url, timeout_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }
}

impl Upsampler for HttpUpsampler {
    fn info(&self) -> &CapabilityInfo {
        &self.info
    }

    fn upsample(&self, audio: &AudioArtifact, steps: i64) -> Result<AudioArtifact> {
        self.endpoint.invoke(&self.info.name, audio, Some(steps))
    }

    fn is_available(&self) -> bool {
        self.endpoint.check_health()
    }
}

/// Hosted noise reduction service (DeepFilterNet v2)
pub struct HttpDenoiser {
    info: CapabilityInfo,
    endpoint: ServiceEndpoint,
}

impl HttpDenoiser {
    pub fn new(base_url: String, timeout_ms: u64) -> Self {
        Self {
            info: CapabilityInfo::new(
                "deepfilternet_v2",
                "remote",
                "Removes background noise from speech and music",
            ),
            endpoint: ServiceEndpoint::new(base_url, timeout_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }
}

impl Denoiser for HttpDenoiser {
    fn info(&self) -> &CapabilityInfo {
        &self.info
    }

    fn denoise(&self, audio: &AudioArtifact) -> Result<AudioArtifact> {
        self.endpoint.invoke(&self.info.name, audio, None)
    }

    fn is_available(&self) -> bool {
        self.endpoint.check_health()
    }
}
