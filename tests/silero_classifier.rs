#[cfg(feature = "silero-onnx")]
#[test]
fn silero_classifier_errors_on_missing_model() {
    use speechgate::classifiers::silero::SileroClassifier;

    let msg = match SileroClassifier::new("tests/fixtures/does-not-exist.onnx") {
        Ok(_) => panic!("expected error for missing model"),
        Err(err) => err.to_string(),
    };
    assert!(
        msg.contains("failed to load Silero ONNX model"),
        "unexpected error message:\n{msg}"
    );
}

#[cfg(feature = "silero-onnx")]
#[test]
fn window_size_tracks_sampling_rate() {
    use speechgate::classifiers::silero::SileroClassifier;

    assert_eq!(SileroClassifier::window_size(16_000), 512);
    assert_eq!(SileroClassifier::window_size(8_000), 256);
}
