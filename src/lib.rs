//! `speechgate` — a small, focused speech-boundary detection library.
//!
//! This crate provides:
//! - A hysteresis/debounce state machine that turns per-frame speech
//!   probabilities into discrete boundary events (speech started / ended)
//! - A pluggable classifier seam for the acoustic model producing those
//!   probabilities
//! - An optional Silero VAD classifier backed by ONNX Runtime
//! - PCM/WAV ingestion helpers for feeding audio into a detector
//!
//! The library is designed to be used by both CLI tools and long-running
//! services, with an emphasis on bounded detection latency and minimal
//! surprises: single-frame probability spikes never flip the machine.

// High-level API (most consumers should start here).
pub mod config;
pub mod detector;

// Boundary events emitted per frame.
pub mod event;

// Acoustic-classifier seam and built-in classifiers.
pub mod classifier;
pub mod classifiers;

// Audio ingestion helpers.
pub mod pcm;
pub mod wav;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use config::DetectorConfig;
pub use detector::Detector;
pub use error::{Error, Result};
pub use event::{Position, VadEvent};
