//! Error handling for the audio enhancer
//!
//! Local validation errors stop a call before any service is contacted.
//! Capability errors come from the upsampler or denoiser and are passed
//! to the caller untouched.

use thiserror::Error;

/// Result type alias for enhancer operations
pub type Result<T> = std::result::Result<T, EnhancerError>;

/// Main error type for enhancer operations
#[derive(Error, Debug)]
pub enum EnhancerError {
    // Validation Errors
    #[error("Audio format must be mp3 or wav, got '{format}'")]
    InvalidFormat { format: String },

    #[error("Mode must be one of [upsample, noise, all], got '{mode}'")]
    InvalidMode { mode: String },

    // Capability Errors
    #[error("Capability not registered: {id}")]
    CapabilityNotFound { id: String },

    #[error("Capability '{id}' unavailable: {reason}")]
    CapabilityUnavailable { id: String, reason: String },

    #[error("Capability '{id}' timed out after {timeout_ms}ms")]
    CapabilityTimeout { id: String, timeout_ms: u64 },

    #[error("Capability '{id}' failed: {reason}")]
    CapabilityFailed { id: String, reason: String },

    #[error("Capability '{id}' returned a malformed response: {reason}")]
    MalformedResponse { id: String, reason: String },

    // Configuration Errors
    #[error("Invalid configuration value for {key}: '{value}' ({reason})")]
    InvalidConfig {
        key: String,
        value: String,
        reason: String,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EnhancerError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EnhancerError::InvalidFormat { .. } => "INVALID_FORMAT",
            EnhancerError::InvalidMode { .. } => "INVALID_MODE",
            EnhancerError::CapabilityNotFound { .. } => "CAPABILITY_NOT_FOUND",
            EnhancerError::CapabilityUnavailable { .. } => "CAPABILITY_UNAVAILABLE",
            EnhancerError::CapabilityTimeout { .. } => "CAPABILITY_TIMEOUT",
            EnhancerError::CapabilityFailed { .. } => "CAPABILITY_FAILED",
            EnhancerError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            EnhancerError::InvalidConfig { .. } => "INVALID_CONFIG",
            EnhancerError::Io(_) => "IO_ERROR",
            EnhancerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// True for failures surfaced by (or while resolving) an external capability
    pub fn is_capability_error(&self) -> bool {
        matches!(
            self,
            EnhancerError::CapabilityNotFound { .. }
                | EnhancerError::CapabilityUnavailable { .. }
                | EnhancerError::CapabilityTimeout { .. }
                | EnhancerError::CapabilityFailed { .. }
                | EnhancerError::MalformedResponse { .. }
        )
    }

    /// Check if the caller can fix this by changing the request or retrying later
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EnhancerError::InvalidFormat { .. }
                | EnhancerError::InvalidMode { .. }
                | EnhancerError::CapabilityUnavailable { .. }
                | EnhancerError::CapabilityTimeout { .. }
                | EnhancerError::InvalidConfig { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            EnhancerError::InvalidFormat { .. } => vec![
                "Convert the file to mp3 or wav",
                "The extension check is case-sensitive: use '.wav', not '.WAV'",
            ],
            EnhancerError::InvalidMode { .. } => vec!["Use one of: upsample, noise, all"],
            EnhancerError::CapabilityNotFound { .. } => vec![
                "Register both an 'upsampler' and a 'denoiser' before dispatching",
            ],
            EnhancerError::CapabilityUnavailable { .. } => vec![
                "Check that the service is running and reachable",
                "Verify ENHANCER_UPSAMPLER_URL and ENHANCER_DENOISER_URL",
            ],
            EnhancerError::CapabilityTimeout { .. } => vec![
                "Lower the enhancement step count",
                "Raise ENHANCER_TIMEOUT_MS",
                "Try a shorter audio clip",
            ],
            EnhancerError::InvalidConfig { .. } => {
                vec!["Fix or unset the offending environment variable"]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EnhancerError::InvalidFormat {
            format: "flac".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_FORMAT");
        assert!(err.to_string().contains("flac"));
    }

    #[test]
    fn test_capability_classification() {
        let err = EnhancerError::CapabilityTimeout {
            id: "upsampler".to_string(),
            timeout_ms: 1000,
        };
        assert!(err.is_capability_error());
        assert!(err.is_recoverable());
        assert!(!err.recovery_suggestions().is_empty());

        let err = EnhancerError::InvalidMode {
            mode: "louder".to_string(),
        };
        assert!(!err.is_capability_error());
    }

    #[test]
    fn test_failed_capability_not_recoverable() {
        let err = EnhancerError::CapabilityFailed {
            id: "denoiser".to_string(),
            reason: "CUDA out of memory".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(err.recovery_suggestions().is_empty());
    }
}
