use crate::Result;

/// Acoustic classifier used by [`crate::Detector`].
///
/// A classifier is responsible for turning one frame of normalized mono
/// `f32` samples into a single speech probability. The detector treats that
/// probability as opaque evidence; all boundary logic lives on the detector
/// side.
///
/// Implementations may carry recurrent state across frames (Silero VAD
/// does), which is why `predict` takes `&mut self` and why one classifier
/// instance must not be shared across independent audio streams.
pub trait Classifier {
    /// Return the probability in `[0, 1]` that `frame` contains speech.
    ///
    /// Failures are surfaced as [`crate::Error::Inference`]; the detector
    /// propagates them to the caller without retrying.
    fn predict(&mut self, frame: &[f32], sampling_rate: u32) -> Result<f32>;

    /// Clear any recurrent memory, e.g. between sessions.
    fn reset_state(&mut self);

    /// Release underlying resources (model sessions, device handles).
    ///
    /// Called once during detector teardown. The default implementation is
    /// a no-op for classifiers whose resources are released on drop.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
