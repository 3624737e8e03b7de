use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sampling rates the detector accepts.
///
/// Silero-style VAD models are trained for 8 kHz and 16 kHz only, so any
/// other rate is rejected at construction rather than silently producing
/// nonsense boundary positions.
pub const SUPPORTED_SAMPLING_RATES: [u32; 2] = [8000, 16000];

/// Options that control how speech boundaries are detected.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. Frontends (CLIs, services, tests) map user input into this type
/// so the library remains reusable outside of any particular host.
///
/// Thresholds form a hysteresis pair: a frame must reach `start_threshold`
/// to count toward speech onset, while silence only starts accumulating once
/// probability drops below `end_threshold`. Keeping `end_threshold` below
/// `start_threshold` avoids rapid toggling near a single boundary; the gap
/// is conventional, not structurally enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Sampling rate of the incoming audio, in Hz.
    ///
    /// Sets the time base for all duration conversions. Must be one of
    /// [`SUPPORTED_SAMPLING_RATES`].
    pub sampling_rate: u32,

    /// Probability a frame must reach to count toward speech onset.
    pub start_threshold: f32,

    /// Probability below which silence begins accumulating while triggered.
    pub end_threshold: f32,

    /// Silence run length required to confirm an end of speech, in ms.
    pub min_silence_duration_ms: u32,

    /// Padding applied around reported boundaries, in ms.
    ///
    /// Subtracted from the start position (floored at sample 0) and added to
    /// the end position, so speech onset/offset is not clipped.
    pub speech_pad_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 16_000,
            start_threshold: 0.5,
            end_threshold: 0.35,
            min_silence_duration_ms: 100,
            speech_pad_ms: 30,
        }
    }
}

impl DetectorConfig {
    /// Validate the configuration, returning a [`Error::Config`] describing
    /// the first violation found.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_SAMPLING_RATES.contains(&self.sampling_rate) {
            return Err(Error::config(format!(
                "unsupported sampling rate {} Hz; must be one of {:?}",
                self.sampling_rate, SUPPORTED_SAMPLING_RATES
            )));
        }

        if !(0.0..=1.0).contains(&self.start_threshold) {
            return Err(Error::config(format!(
                "start_threshold {} is outside [0, 1]",
                self.start_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.end_threshold) {
            return Err(Error::config(format!(
                "end_threshold {} is outside [0, 1]",
                self.end_threshold
            )));
        }

        Ok(())
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| Error::config(format!("failed to parse config JSON: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Minimum silence run, converted to a fractional sample count.
    ///
    /// Kept fractional here; truncation happens only at the point of final
    /// sample-index arithmetic in the detector.
    pub(crate) fn min_silence_samples(&self) -> f32 {
        self.sampling_rate as f32 * self.min_silence_duration_ms as f32 / 1000.0
    }

    /// Boundary padding, converted to a fractional sample count.
    pub(crate) fn speech_pad_samples(&self) -> f32 {
        self.sampling_rate as f32 * self.speech_pad_ms as f32 / 1000.0
    }
}
