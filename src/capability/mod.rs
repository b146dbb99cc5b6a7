//! External capability interfaces and implementations
//!
//! This module provides:
//! - `Upsampler` and `Denoiser` traits for the hosted services
//! - HTTP clients for the real services
//! - Capability registry resolved by identifier
//! - Mock implementations for testing

mod http;
mod mock;
mod model;
mod registry;

pub use http::{HttpDenoiser, HttpUpsampler};
pub use mock::*;
pub use model::{CapabilityInfo, Denoiser, Upsampler};
pub use registry::{
    CapabilityKind, CapabilityRegistry, CapabilityStatus, DENOISER_ID, UPSAMPLER_ID,
};
