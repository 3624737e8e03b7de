//! Raw PCM ingestion.
//!
//! Callers whose audio arrives as little-endian 16-bit signed PCM can use
//! this module to produce the normalized `f32` frames the detector expects.

/// Decode little-endian signed 16-bit PCM bytes into normalized samples.
///
/// Each sample is divided by 32767 so full-scale audio lands in roughly
/// `[-1.0, 1.0]` (a full-scale negative sample is slightly below -1.0,
/// which Silero-style models tolerate).
///
/// A trailing odd byte is ignored.
pub fn decode_i16le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / i16::MAX as f32)
        .collect()
}
