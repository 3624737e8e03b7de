use serde::Serialize;

/// A boundary position reported with a [`VadEvent`].
///
/// The representation depends on the `return_seconds` flag passed to
/// [`crate::Detector::process_frame`]:
/// - `Samples` carries the raw cumulative sample index.
/// - `Seconds` carries the position in seconds, rounded half-up to one
///   decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Position {
    Samples(u64),
    Seconds(f64),
}

/// The outcome of processing one audio frame.
///
/// This is a closed type: every frame maps to exactly one of these four
/// variants, so consumers can match exhaustively instead of comparing
/// strings or inspecting ad hoc maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", content = "position", rename_all = "snake_case")]
pub enum VadEvent {
    /// Nothing happened: idle below the start threshold, or triggered and
    /// still above the end threshold.
    None,

    /// Evidence is accumulating (onset debounce or silence hangover), but
    /// no boundary has been crossed yet.
    Pending,

    /// Speech started at the given position.
    SpeechStart(Position),

    /// Speech ended at the given position.
    SpeechEnd(Position),
}

impl VadEvent {
    /// Whether this event marks a speech boundary.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::SpeechStart(_) | Self::SpeechEnd(_))
    }
}

/// Convert a sample index into a [`Position`] for reporting.
///
/// When `return_seconds` is set, the index is converted to seconds and
/// rounded half-up to one decimal place (so 1.25s reports as 1.3s, never
/// 1.2s as banker's rounding would give).
pub(crate) fn position(sample: u64, sampling_rate: u32, return_seconds: bool) -> Position {
    if return_seconds {
        Position::Seconds(round_seconds(sample as f64 / sampling_rate as f64))
    } else {
        Position::Samples(sample)
    }
}

/// Round a non-negative seconds value half-up to one decimal place.
fn round_seconds(seconds: f64) -> f64 {
    (seconds * 10.0 + 0.5).floor() / 10.0
}
