use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use speechgate::classifiers::silero::SileroClassifier;
use speechgate::config::DetectorConfig;
use speechgate::detector::Detector;
use speechgate::wav::get_samples_from_wav;

fn main() -> Result<()> {
    speechgate::logging::init();
    let params = Params::parse();

    let config = match &params.config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{path}'"))?;
            DetectorConfig::from_json(&json)?
        }
        None => DetectorConfig::default(),
    };

    let (samples, spec) = get_samples_from_wav(&params.audio_path)?;
    anyhow::ensure!(
        spec.sample_rate == config.sampling_rate,
        "WAV is {} Hz but the detector is configured for {} Hz",
        spec.sample_rate,
        config.sampling_rate
    );

    let classifier = SileroClassifier::new(&params.model_path)?;
    let mut detector = Detector::new(classifier, config)?;

    let window = SileroClassifier::window_size(config.sampling_rate);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Feed whole windows only; a short tail carries no full frame of
    // evidence and is dropped, as in live-streaming use.
    for frame in samples.chunks_exact(window) {
        let event = detector.process_frame(frame, params.seconds)?;
        if event.is_boundary() || params.all_events {
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
        }
    }

    detector.close()?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "speechgate")]
#[command(about = "Detect speech boundaries in a WAV file")]
struct Params {
    /// Path to the Silero VAD ONNX model.
    #[arg(short = 'm', long = "model")]
    pub model_path: String,

    /// Path to a mono 8/16 kHz WAV file.
    #[arg(short = 'a', long = "audio")]
    pub audio_path: String,

    /// Optional JSON detector configuration.
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Report boundary positions as rounded seconds instead of sample indices.
    #[arg(long = "seconds", default_value_t = false)]
    pub seconds: bool,

    /// Print every per-frame event, not just boundaries.
    #[arg(long = "all-events", default_value_t = false)]
    pub all_events: bool,
}
