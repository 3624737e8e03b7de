//! Built-in acoustic classifiers.

/// Silero VAD classifier (ONNX Runtime).
#[cfg(feature = "silero-onnx")]
pub mod silero;
