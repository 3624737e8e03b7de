use std::error::Error as StdError;

use thiserror::Error;

/// Speechgate's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Speechgate's crate-wide error type.
///
/// The variants map to distinct failure domains so callers can react
/// differently to each:
/// - `Config` is fatal to construction; no detector is produced.
/// - `Inference` is recoverable per frame at the caller's discretion.
/// - `Resource` surfaces teardown failures without blocking teardown of the
///   detector's own state.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration at construction time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The classifier failed to produce a probability for a frame.
    #[error("classifier inference failed: {0}")]
    Inference(#[source] Box<dyn StdError + Send + Sync>),

    /// The classifier failed to release its underlying resources.
    #[error("classifier teardown failed: {0}")]
    Resource(#[source] Box<dyn StdError + Send + Sync>),

    /// Audio ingestion failure (PCM/WAV decoding helpers).
    #[error("failed to decode audio: {0}")]
    Audio(String),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn audio(message: impl Into<String>) -> Self {
        Self::Audio(message.into())
    }

    /// Wrap an arbitrary error as a per-frame inference failure.
    pub fn inference(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Inference(err.into())
    }

    /// Wrap an arbitrary error as a teardown failure.
    pub fn resource(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Resource(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Audio(err.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Self::Audio(err.to_string())
    }
}
