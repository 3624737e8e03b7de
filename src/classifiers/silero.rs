//! Silero VAD classifier backed by ONNX Runtime (`ort`).
//!
//! Model contract (Silero VAD v5 ONNX export):
//! - Inputs:  `input` `[batch, context + window]` f32, `state` `[2, batch, 128]` f32,
//!   `sr` scalar i64
//! - Outputs: `output` `[batch, 1]` speech probability, `stateN` updated state
//!
//! The model is recurrent: `state` must round-trip between calls, and the
//! last `context` samples of each window are prepended to the next one. Both
//! are per-session, which is why one classifier instance must not be shared
//! across streams.

use std::path::Path;

use ndarray::{Array1, Array2, Array3, Ix3};
use ort::session::Session;
use ort::value::Tensor;
use tracing::trace;

use crate::classifier::Classifier;
use crate::error::{Error, Result};

/// Samples of trailing context carried between windows at 16 kHz.
const CONTEXT_16K: usize = 64;

/// Expected window size at 16 kHz (32 ms). Halved at 8 kHz.
const WINDOW_16K: usize = 512;

/// [`Classifier`] implementation running the Silero VAD ONNX model.
pub struct SileroClassifier {
    session: Session,
    /// Recurrent state tensor, shape `[2, 1, 128]`.
    state: Array3<f32>,
    /// Trailing samples from the previous window.
    context: Vec<f32>,
}

impl SileroClassifier {
    /// Load the Silero VAD model from an ONNX file.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let session = Session::builder()
            .map_err(|err| {
                Error::config(format!("failed to create ONNX Runtime session builder: {err}"))
            })?
            .commit_from_file(model_path.as_ref())
            .map_err(|err| {
                Error::config(format!(
                    "failed to load Silero ONNX model from '{}': {err}",
                    model_path.as_ref().display()
                ))
            })?;

        Ok(Self {
            session,
            state: Array3::<f32>::zeros((2, 1, 128)),
            context: Vec::new(),
        })
    }

    /// Window size the model expects per call at the given rate.
    pub fn window_size(sampling_rate: u32) -> usize {
        if sampling_rate == 16_000 {
            WINDOW_16K
        } else {
            WINDOW_16K / 2
        }
    }

    fn context_size(sampling_rate: u32) -> usize {
        if sampling_rate == 16_000 {
            CONTEXT_16K
        } else {
            CONTEXT_16K / 2
        }
    }
}

impl Classifier for SileroClassifier {
    fn predict(&mut self, frame: &[f32], sampling_rate: u32) -> Result<f32> {
        let window = Self::window_size(sampling_rate);
        let context = Self::context_size(sampling_rate);

        if frame.len() != window {
            return Err(Error::inference(format!(
                "Silero VAD expects {window}-sample frames at {sampling_rate} Hz, got {}",
                frame.len()
            )));
        }

        // Prepend the previous window's tail -> shape [1, context + window].
        self.context.resize(context, 0.0);
        let mut input_data = Vec::with_capacity(context + window);
        input_data.extend_from_slice(&self.context);
        input_data.extend_from_slice(frame);

        let input_len = input_data.len();
        let input = Array2::from_shape_vec((1, input_len), input_data.clone())
            .map_err(Error::inference)?;
        let sr = Array1::from_vec(vec![sampling_rate as i64]);

        let outputs = self
            .session
            .run(ort::inputs![
                "input" => Tensor::from_array(input).map_err(Error::inference)?,
                "state" => Tensor::from_array(self.state.clone()).map_err(Error::inference)?,
                "sr" => Tensor::from_array(sr).map_err(Error::inference)?,
            ])
            .map_err(Error::inference)?;

        // Speech probability from `output` [1, 1].
        let prob_view = outputs["output"]
            .try_extract_array::<f32>()
            .map_err(Error::inference)?;
        let prob = prob_view[[0, 0]];

        // Round-trip the recurrent state from `stateN` [2, 1, 128].
        let new_state = outputs["stateN"]
            .try_extract_array::<f32>()
            .map_err(Error::inference)?;
        self.state = new_state
            .into_dimensionality::<Ix3>()
            .map_err(Error::inference)?
            .to_owned();

        self.context
            .copy_from_slice(&input_data[input_len - context..]);

        trace!(prob, "silero inference");
        Ok(prob)
    }

    fn reset_state(&mut self) {
        self.state.fill(0.0);
        self.context.clear();
    }
}
