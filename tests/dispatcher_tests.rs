//! Dispatcher integration tests
//!
//! Drives the public API with mock capabilities and checks which services
//! are called, in what order, and with which artifacts.

use std::sync::Arc;

use audio_enhancer::capability::{DENOISER_ID, UPSAMPLER_ID};
use audio_enhancer::{
    AudioArtifact, CallLog, CapabilityCall, CapabilityRegistry, Dispatcher, EnhanceRequest,
    EnhancerError, MockDenoiser, MockUpsampler, RecordingObserver, Stage,
};

fn mock_dispatcher() -> (Dispatcher, CallLog, Arc<RecordingObserver>) {
    let log = CallLog::new();
    let observer = Arc::new(RecordingObserver::new());
    let dispatcher =
        Dispatcher::new(CapabilityRegistry::with_mocks(&log)).with_observer(observer.clone());
    (dispatcher, log, observer)
}

fn registry_with(upsampler: MockUpsampler, denoiser: MockDenoiser) -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register_upsampler(UPSAMPLER_ID, Arc::new(upsampler));
    registry.register_denoiser(DENOISER_ID, Arc::new(denoiser));
    registry
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_format_issues_no_calls() {
    let (dispatcher, log, observer) = mock_dispatcher();

    for location in ["clip.flac", "clip.ogg", "clip.WAV", "clip.Mp3", "clip", "clip.wav.txt"] {
        for mode in ["upsample", "noise", "all", "garbage"] {
            let err = dispatcher
                .enhance(&AudioArtifact::new(location), mode, 50)
                .unwrap_err();
            assert!(
                matches!(err, EnhancerError::InvalidFormat { .. }),
                "{} / {} gave {:?}",
                location,
                mode,
                err
            );
        }
    }

    assert!(log.is_empty());
    assert!(observer.stages().is_empty());
}

#[test]
fn test_invalid_mode_issues_no_calls() {
    let (dispatcher, log, _) = mock_dispatcher();

    for mode in ["", "   ", "denoise", "upsampling", "all ofit", "up sample", "none"] {
        let err = dispatcher
            .enhance(&AudioArtifact::new("clip.wav"), mode, 50)
            .unwrap_err();
        assert!(matches!(err, EnhancerError::InvalidMode { .. }), "mode {:?}", mode);
    }

    assert!(log.is_empty());
}

#[test]
fn test_mode_is_case_and_whitespace_insensitive() {
    for mode in [" Upsample ", "UPSAMPLE", "upsample", "\tuPsAmPlE\n"] {
        let (dispatcher, log, _) = mock_dispatcher();

        dispatcher
            .enhance(&AudioArtifact::new("clip.wav"), mode, 50)
            .unwrap();

        assert_eq!(
            log.calls(),
            vec![CapabilityCall::Upsample {
                input: AudioArtifact::new("clip.wav"),
                steps: 50,
            }],
            "mode {:?}",
            mode
        );
    }
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_upsample_calls_only_upsampler() {
    let log = CallLog::new();
    let registry = registry_with(
        MockUpsampler::new(log.clone()).with_output("https://cdn/hi-res.wav"),
        MockDenoiser::new(log.clone()),
    );
    let dispatcher = Dispatcher::new(registry);

    let out = dispatcher
        .enhance(&AudioArtifact::new("audio.wav"), "upsample", 120)
        .unwrap();

    assert_eq!(out, AudioArtifact::new("https://cdn/hi-res.wav"));
    assert_eq!(
        log.calls(),
        vec![CapabilityCall::Upsample {
            input: AudioArtifact::new("audio.wav"),
            steps: 120,
        }]
    );
}

#[test]
fn test_noise_calls_only_denoiser() {
    let (dispatcher, log, observer) = mock_dispatcher();

    let out = dispatcher
        .enhance(&AudioArtifact::new("clip.mp3"), "Noise", 50)
        .unwrap();

    assert_eq!(out.location(), "clip_denoised.mp3");
    assert_eq!(
        log.calls(),
        vec![CapabilityCall::Denoise {
            input: AudioArtifact::new("clip.mp3"),
        }]
    );
    assert_eq!(observer.stages(), vec![Stage::Denoise]);
}

#[test]
fn test_all_feeds_upsampled_output_to_denoiser() {
    let log = CallLog::new();
    let registry = registry_with(
        MockUpsampler::new(log.clone()).with_output("intermediate.wav"),
        MockDenoiser::new(log.clone()).with_output("final.wav"),
    );
    let observer = Arc::new(RecordingObserver::new());
    let dispatcher = Dispatcher::new(registry).with_observer(observer.clone());

    let out = dispatcher.run(&EnhanceRequest::new("audio.wav")).unwrap();

    assert_eq!(out, AudioArtifact::new("final.wav"));
    assert_eq!(
        log.calls(),
        vec![
            CapabilityCall::Upsample {
                input: AudioArtifact::new("audio.wav"),
                steps: 50,
            },
            CapabilityCall::Denoise {
                input: AudioArtifact::new("intermediate.wav"),
            },
        ]
    );
    assert_eq!(observer.stages(), vec![Stage::Upsample, Stage::Denoise]);
}

#[test]
fn test_steps_forwarded_unmodified() {
    let (dispatcher, log, _) = mock_dispatcher();

    for steps in [0, 9, 10, 150, 151, 10_000] {
        dispatcher
            .enhance(&AudioArtifact::new("a.wav"), "all", steps)
            .unwrap();
    }

    let forwarded: Vec<i64> = log
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            CapabilityCall::Upsample { steps, .. } => Some(steps),
            CapabilityCall::Denoise { .. } => None,
        })
        .collect();
    assert_eq!(forwarded, vec![0, 9, 10, 150, 151, 10_000]);
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn test_upsampler_failure_skips_denoiser() {
    let log = CallLog::new();
    let registry = registry_with(
        MockUpsampler::new(log.clone()).failing("GPU worker crashed"),
        MockDenoiser::new(log.clone()),
    );
    let observer = Arc::new(RecordingObserver::new());
    let dispatcher = Dispatcher::new(registry).with_observer(observer.clone());

    let err = dispatcher
        .enhance(&AudioArtifact::new("audio.wav"), "all", 50)
        .unwrap_err();

    match err {
        EnhancerError::CapabilityFailed { id, reason } => {
            assert_eq!(id, "audiosr");
            assert_eq!(reason, "GPU worker crashed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(log.len(), 1);
    assert!(matches!(log.calls()[0], CapabilityCall::Upsample { .. }));
    assert!(observer.stages().is_empty());
}

#[test]
fn test_denoiser_failure_propagates_after_upsample() {
    let log = CallLog::new();
    let registry = registry_with(
        MockUpsampler::new(log.clone()),
        MockDenoiser::new(log.clone()).failing("timeout in model"),
    );
    let observer = Arc::new(RecordingObserver::new());
    let dispatcher = Dispatcher::new(registry).with_observer(observer.clone());

    let err = dispatcher
        .enhance(&AudioArtifact::new("audio.wav"), "all", 50)
        .unwrap_err();

    assert!(err.is_capability_error());
    assert_eq!(log.len(), 2);
    assert_eq!(observer.stages(), vec![Stage::Upsample]);
}

#[test]
fn test_missing_capability_is_resolution_error() {
    let log = CallLog::new();
    let mut registry = CapabilityRegistry::new();
    registry.register_denoiser(DENOISER_ID, Arc::new(MockDenoiser::new(log.clone())));
    let dispatcher = Dispatcher::new(registry);

    // Both capabilities are resolved up front, even for denoise-only calls.
    let err = dispatcher
        .enhance(&AudioArtifact::new("clip.mp3"), "noise", 50)
        .unwrap_err();

    assert!(matches!(err, EnhancerError::CapabilityNotFound { ref id } if id == UPSAMPLER_ID));
    assert!(log.is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_dispatcher_shared_across_threads() {
    let (dispatcher, log, _) = mock_dispatcher();
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                dispatcher
                    .enhance(&AudioArtifact::new(format!("track{}.wav", i)), "all", 50)
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out.location(), format!("track{}_upsampled_denoised.wav", i));
    }
    assert_eq!(log.len(), 16);
}
