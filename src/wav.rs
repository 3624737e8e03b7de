use std::io::{Read, Seek};
use std::path::Path;

use hound::{WavReader, WavSpec};

use crate::config::SUPPORTED_SAMPLING_RATES;
use crate::error::{Error, Result};

/// Load WAV audio from a reader and return normalized audio samples.
///
/// What we return:
/// - A `Vec<f32>` containing mono audio samples normalized to `[-1.0, 1.0]`
/// - The associated `WavSpec` so callers still have access to metadata
///
/// Format requirements:
/// - Mono (1 channel)
/// - A sampling rate the detector supports (8 kHz or 16 kHz)
///
/// Enforcing the constraints here keeps the frame-slicing loop downstream
/// simple and predictable.
pub fn get_samples_from_wav_reader<R>(reader: R) -> Result<(Vec<f32>, WavSpec)>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader)?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(Error::audio(format!(
            "expected mono WAV (1 channel), got {} channels",
            spec.channels
        )));
    }

    if !SUPPORTED_SAMPLING_RATES.contains(&spec.sample_rate) {
        return Err(Error::audio(format!(
            "expected one of {:?} Hz, got {} Hz",
            SUPPORTED_SAMPLING_RATES, spec.sample_rate
        )));
    }

    // Read samples and normalize from i16 PCM to f32 in [-1.0, 1.0].
    let mut samples = Vec::new();
    for sample in reader.samples::<i16>() {
        let pcm = sample?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok((samples, spec))
}

/// Load WAV audio from a file path. See [`get_samples_from_wav_reader`].
pub fn get_samples_from_wav(path: impl AsRef<Path>) -> Result<(Vec<f32>, WavSpec)> {
    let file = std::fs::File::open(path.as_ref())?;
    get_samples_from_wav_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn wav_bytes(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn loads_mono_16k_wav() {
        let bytes = wav_bytes(1, 16_000, &[0, i16::MAX, i16::MIN]);
        let (samples, spec) = get_samples_from_wav_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1], 1.0);
        assert!(samples[2] < -1.0);
    }

    #[test]
    fn rejects_stereo() {
        let bytes = wav_bytes(2, 16_000, &[0, 0]);
        let err = get_samples_from_wav_reader(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Audio(_)), "unexpected error: {err}");
    }

    #[test]
    fn rejects_unsupported_sample_rate() {
        let bytes = wav_bytes(1, 44_100, &[0]);
        assert!(get_samples_from_wav_reader(Cursor::new(bytes)).is_err());
    }
}
