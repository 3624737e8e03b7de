//! The speech-boundary detector.
//!
//! This module owns the hysteresis/debounce state machine that converts a
//! sequential stream of audio frames into boundary events. The probability
//! for each frame comes from an injected [`Classifier`]; everything else —
//! trigger state, silence timers, debounce counters, padding arithmetic —
//! lives here.
//!
//! A detector instance is strictly single-session and single-threaded:
//! frames must arrive in temporal order, one call at a time. Independent
//! audio streams each get their own detector and classifier instance.

use tracing::debug;

use crate::classifier::Classifier;
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::event::{self, VadEvent};
use crate::pcm;

/// Consecutive qualifying frames required before a speech start is
/// confirmed. Fixed at 3 to match established Silero post-processing
/// timing.
const START_DEBOUNCE_FRAMES: u32 = 3;

/// Mutable per-session state, exclusively owned by one [`Detector`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SessionState {
    /// True while inside a detected speech region.
    triggered: bool,

    /// Provisional end-of-speech sample, present once probability first
    /// drops below the end threshold while triggered. Cleared whenever
    /// `triggered` goes false, and on hangover cancellation.
    temp_end: Option<u64>,

    /// Cumulative samples processed this session. Never decreases;
    /// advances by exactly the frame length on every call.
    current_sample: u64,

    /// Consecutive qualifying frames seen while not yet triggered.
    start_count: u32,

    /// Padded start position captured on the first qualifying frame of a
    /// debounce run, reported when the run confirms.
    pending_start: u64,
}

/// Converts per-frame speech probabilities into boundary events.
///
/// `Detector` wraps an injected [`Classifier`] with a hysteresis state
/// machine:
/// - onset requires 3 consecutive frames at or above `start_threshold`
///   (debounce), reported with back-padding applied;
/// - offset requires a contiguous silence run below `end_threshold` of at
///   least `min_silence_duration_ms` (hangover), reported with forward
///   padding applied;
/// - a frame back above `start_threshold` cancels a pending end, so brief
///   pauses never split an utterance.
///
/// Typical usage:
/// - Construct once per audio stream (classifier state is per-session).
/// - Call [`Detector::process_frame`] for every fixed-size window, in order.
/// - Call [`Detector::reset`] between sessions, or [`Detector::close`] when
///   done.
#[derive(Debug)]
pub struct Detector<C: Classifier> {
    classifier: C,
    config: DetectorConfig,
    // Duration options converted to fractional sample counts up front.
    min_silence_samples: f32,
    speech_pad_samples: f32,
    state: SessionState,
}

impl<C: Classifier> Detector<C> {
    /// Create a detector over `classifier` with the given configuration.
    ///
    /// Fails with [`crate::Error::Config`] when the configuration is
    /// invalid (most notably a sampling rate outside 8 kHz / 16 kHz); no
    /// detector is produced in that case.
    pub fn new(classifier: C, config: DetectorConfig) -> Result<Self> {
        config.validate()?;

        let mut detector = Self {
            classifier,
            min_silence_samples: config.min_silence_samples(),
            speech_pad_samples: config.speech_pad_samples(),
            config,
            state: SessionState::default(),
        };
        detector.reset();
        Ok(detector)
    }

    /// The configuration this detector was built with.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Whether the detector is currently inside a speech region.
    pub fn is_triggered(&self) -> bool {
        self.state.triggered
    }

    /// Cumulative samples processed since construction or the last reset.
    pub fn current_sample(&self) -> u64 {
        self.state.current_sample
    }

    /// Reset session state and the classifier's recurrent memory.
    ///
    /// Idempotent: after this call the detector behaves observationally
    /// identically to a freshly constructed one.
    pub fn reset(&mut self) {
        self.classifier.reset_state();
        self.state = SessionState::default();
    }

    /// Tear the detector down, releasing classifier resources.
    ///
    /// A [`crate::Error::Resource`] from the classifier is surfaced but the
    /// detector's own state is gone either way.
    pub fn close(mut self) -> Result<()> {
        self.reset();
        self.classifier.close()
    }

    /// Process one frame of raw little-endian 16-bit PCM.
    ///
    /// Convenience over [`Detector::process_frame`] for callers whose audio
    /// arrives as PCM bytes; see [`pcm::decode_i16le`] for the decode.
    pub fn process_pcm(&mut self, bytes: &[u8], return_seconds: bool) -> Result<VadEvent> {
        let frame = pcm::decode_i16le(bytes);
        self.process_frame(&frame, return_seconds)
    }

    /// Process one frame of normalized mono samples and report what, if
    /// anything, happened at the speech boundary.
    ///
    /// Frames must arrive in strict temporal order and should keep a
    /// consistent length within a session. `return_seconds` selects whether
    /// boundary positions are reported as raw sample indices or as seconds
    /// rounded half-up to one decimal place.
    ///
    /// A classifier failure is returned as [`crate::Error::Inference`].
    /// The sample clock has already advanced for the failed frame, so the
    /// time base stays consistent; the caller decides whether to retry the
    /// audio, skip it, or [`Detector::reset`].
    pub fn process_frame(&mut self, frame: &[f32], return_seconds: bool) -> Result<VadEvent> {
        self.state.current_sample += frame.len() as u64;

        let speech_prob = self
            .classifier
            .predict(frame, self.config.sampling_rate)?;

        // Hangover cancellation: speech resumed before the provisional end
        // was confirmed, so the end candidate is discarded.
        if speech_prob >= self.config.start_threshold && self.state.temp_end.is_some() {
            debug!(
                sample = self.state.current_sample,
                prob = speech_prob,
                "pending speech end cancelled"
            );
            self.state.temp_end = None;
        }

        if !self.state.triggered {
            return Ok(self.check_start(speech_prob, return_seconds));
        }

        Ok(self.check_end(speech_prob, return_seconds))
    }

    /// Onset path: debounce-gated start detection while idle.
    fn check_start(&mut self, speech_prob: f32, return_seconds: bool) -> VadEvent {
        if speech_prob < self.config.start_threshold {
            self.state.start_count = 0;
            return VadEvent::None;
        }

        self.state.start_count += 1;

        if self.state.start_count == 1 {
            // Capture the padded start position at the beginning of the run
            // and carry it across the debounce window. Truncation to a
            // sample index happens here, at the final arithmetic step.
            let padded = self.state.current_sample as f32 - self.speech_pad_samples;
            self.state.pending_start = padded.max(0.0) as u64;
        }

        if self.state.start_count < START_DEBOUNCE_FRAMES {
            return VadEvent::Pending;
        }

        let speech_start = self.state.pending_start;
        self.state.triggered = true;
        self.state.start_count = 0;
        debug!(
            sample = self.state.current_sample,
            start = speech_start,
            prob = speech_prob,
            "speech start"
        );

        VadEvent::SpeechStart(event::position(
            speech_start,
            self.config.sampling_rate,
            return_seconds,
        ))
    }

    /// Offset path: hangover-gated end detection while triggered.
    fn check_end(&mut self, speech_prob: f32, return_seconds: bool) -> VadEvent {
        if speech_prob >= self.config.end_threshold {
            // Still above the end threshold; a retained temp_end (mid-band
            // probability) stays pending until cancelled or confirmed.
            return VadEvent::None;
        }

        let temp_end = *self
            .state
            .temp_end
            .get_or_insert(self.state.current_sample);

        if ((self.state.current_sample - temp_end) as f32) < self.min_silence_samples {
            // The silence run is not yet long enough to confirm an end.
            return VadEvent::Pending;
        }

        let speech_end = (temp_end as f32 + self.speech_pad_samples) as u64;
        self.state.temp_end = None;
        self.state.triggered = false;
        debug!(
            sample = self.state.current_sample,
            end = speech_end,
            prob = speech_prob,
            "speech end"
        );

        VadEvent::SpeechEnd(event::position(
            speech_end,
            self.config.sampling_rate,
            return_seconds,
        ))
    }
}
