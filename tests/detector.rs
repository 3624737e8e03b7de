use std::collections::VecDeque;

use speechgate::{Detector, DetectorConfig, Position, Result, VadEvent};

/// Classifier that replays a fixed probability script.
#[derive(Debug)]
struct ScriptedClassifier {
    probs: VecDeque<f32>,
}

impl ScriptedClassifier {
    fn new(probs: impl IntoIterator<Item = f32>) -> Self {
        Self {
            probs: probs.into_iter().collect(),
        }
    }
}

impl speechgate::classifier::Classifier for ScriptedClassifier {
    fn predict(&mut self, _frame: &[f32], _sampling_rate: u32) -> Result<f32> {
        Ok(self.probs.pop_front().expect("script exhausted"))
    }

    fn reset_state(&mut self) {}
}

const FRAME: usize = 480;

fn config() -> DetectorConfig {
    DetectorConfig {
        sampling_rate: 16_000,
        start_threshold: 0.5,
        end_threshold: 0.35,
        min_silence_duration_ms: 300,
        speech_pad_ms: 30,
    }
}

fn run(probs: Vec<f32>, return_seconds: bool) -> anyhow::Result<Vec<VadEvent>> {
    let count = probs.len();
    let mut detector = Detector::new(ScriptedClassifier::new(probs), config())?;
    let frame = vec![0.0f32; FRAME];

    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        events.push(detector.process_frame(&frame, return_seconds)?);
    }
    Ok(events)
}

#[test]
fn detects_one_utterance_with_padded_boundaries() -> anyhow::Result<()> {
    // Three qualifying frames confirm the start; 300ms of silence
    // (4800 samples) after the provisional end confirms the end.
    let mut probs = vec![0.6, 0.6, 0.6];
    probs.extend(std::iter::repeat_n(0.1, 11));

    let events = run(probs, false)?;

    assert_eq!(events[0], VadEvent::Pending);
    assert_eq!(events[1], VadEvent::Pending);
    // First qualifying frame ended at sample 480; padded back by 480.
    assert_eq!(events[2], VadEvent::SpeechStart(Position::Samples(0)));

    // The provisional end lands at sample 1920 (end of the first silent
    // frame). The run confirms once 4800 samples of silence accumulate,
    // and the reported end carries 480 samples of forward padding.
    let end_at = events
        .iter()
        .position(|e| matches!(e, VadEvent::SpeechEnd(_)))
        .expect("no end emitted");
    assert_eq!(events[end_at], VadEvent::SpeechEnd(Position::Samples(2400)));

    for event in &events[3..end_at] {
        assert_eq!(*event, VadEvent::Pending);
    }
    Ok(())
}

#[test]
fn boundary_positions_round_half_up_in_seconds() -> anyhow::Result<()> {
    let mut probs = vec![0.6, 0.6, 0.6];
    probs.extend(std::iter::repeat_n(0.1, 11));

    let events = run(probs, true)?;

    assert_eq!(events[2], VadEvent::SpeechStart(Position::Seconds(0.0)));

    // The padded end is sample 2400 = 0.15s, which lands on x.x5 and must
    // round away from zero.
    let end = events
        .iter()
        .find(|e| matches!(e, VadEvent::SpeechEnd(_)))
        .expect("no end emitted");
    assert_eq!(*end, VadEvent::SpeechEnd(Position::Seconds(0.2)));
    Ok(())
}

#[test]
fn clean_second_boundaries_convert_exactly() -> anyhow::Result<()> {
    // 50 silent frames push the first qualifying frame to end at sample
    // 24480; padded back by 480 the start is 24000 = 1.5s exactly.
    let mut probs = vec![0.0; 50];
    probs.extend([0.9, 0.9, 0.9]);

    let events = run(probs, true)?;
    assert_eq!(
        events.last().unwrap(),
        &VadEvent::SpeechStart(Position::Seconds(1.5))
    );
    Ok(())
}

#[test]
fn brief_pause_does_not_split_the_utterance() -> anyhow::Result<()> {
    // 5 silent frames (2400 samples) is well under the 4800-sample
    // hangover, so the utterance continues.
    let mut probs = vec![0.6, 0.6, 0.6];
    probs.extend(std::iter::repeat_n(0.1, 5));
    probs.extend(std::iter::repeat_n(0.8, 4));

    let events = run(probs, false)?;
    let boundaries: Vec<_> = events.iter().filter(|e| e.is_boundary()).collect();
    assert_eq!(boundaries.len(), 1, "only the start should be emitted");
    Ok(())
}

#[test]
fn silence_only_audio_emits_nothing() -> anyhow::Result<()> {
    let events = run(vec![0.05; 40], false)?;
    assert!(events.iter().all(|e| *e == VadEvent::None));
    Ok(())
}

#[test]
fn isolated_probability_spikes_are_rejected() -> anyhow::Result<()> {
    // Single- and double-frame spikes never reach the 3-frame debounce.
    let probs = vec![0.1, 0.9, 0.1, 0.9, 0.9, 0.1, 0.9, 0.1, 0.9, 0.9, 0.1];
    let events = run(probs, false)?;
    assert!(!events.iter().any(|e| e.is_boundary()));
    Ok(())
}

#[test]
fn reset_between_sessions_reproduces_identical_events() -> anyhow::Result<()> {
    let session: Vec<f32> = {
        let mut p = vec![0.2, 0.7, 0.7, 0.7];
        p.extend(std::iter::repeat_n(0.1, 12));
        p
    };

    let mut script = session.clone();
    script.extend(&session);
    let mut detector = Detector::new(ScriptedClassifier::new(script), config())?;
    let frame = vec![0.0f32; FRAME];

    let first: Vec<VadEvent> = (0..session.len())
        .map(|_| detector.process_frame(&frame, false))
        .collect::<Result<_>>()?;

    detector.reset();

    let second: Vec<VadEvent> = (0..session.len())
        .map(|_| detector.process_frame(&frame, false))
        .collect::<Result<_>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn construction_rejects_unsupported_sampling_rate() {
    let bad = DetectorConfig {
        sampling_rate: 44_100,
        ..config()
    };

    let err = Detector::new(ScriptedClassifier::new([]), bad).unwrap_err();
    assert!(
        matches!(err, speechgate::Error::Config(_)),
        "unexpected error: {err}"
    );
}
