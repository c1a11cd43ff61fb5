//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Bit depths [`write_wav_stereo`] can produce. 32 means float.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels in the file.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// A left/right pair of equal-length sample buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel.
    pub left: Vec<f32>,
    /// Right channel.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Pairs two channels. The longer one is truncated to match.
    pub fn new(mut left: Vec<f32>, mut right: Vec<f32>) -> Self {
        let len = left.len().min(right.len());
        left.truncate(len);
        right.truncate(len);
        Self { left, right }
    }

    /// Duplicates a mono buffer into both channels.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            right: samples.clone(),
            left: samples,
        }
    }

    /// Splits `[l, r, l, r, ...]`. A trailing odd sample is dropped.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let (left, right) = samples.chunks_exact(2).map(|f| (f[0], f[1])).unzip();
        Self { left, right }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Appends `frames` frames of silence.
    pub fn extend_silence(&mut self, frames: usize) {
        self.left.resize(self.left.len() + frames, 0.0);
        self.right.resize(self.right.len() + frames, 0.0);
    }
}

fn read_all_samples<R: std::io::Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file as stereo along with its spec.
///
/// Mono files are expanded to stereo by duplicating to both channels.
/// Files with more than 2 channels use only the first two channels.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::UnsupportedFormat("file declares zero channels".to_string()));
    }

    let all_samples = read_all_samples(reader)?;
    let stereo = match channels {
        1 => StereoSamples::from_mono(all_samples),
        2 => StereoSamples::from_interleaved(&all_samples),
        _ => {
            let (left, right) = all_samples
                .chunks_exact(channels)
                .map(|frame| (frame[0], frame[1]))
                .unzip();
            StereoSamples { left, right }
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = stereo.len(),
        "read wav"
    );
    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
///
/// The file is always two-channel; `spec.channels` is ignored. Samples are
/// clamped to `[-1, 1]` for the integer formats.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    if samples.left.len() != samples.right.len() {
        return Err(Error::ChannelMismatch {
            left: samples.left.len(),
            right: samples.right.len(),
        });
    }
    if !SUPPORTED_BIT_DEPTHS.contains(&spec.bits_per_sample) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (expected 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }

    let path = path.as_ref();
    let stereo_spec = WavSpec {
        channels: 2,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(stereo_spec))?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        let quantize = |x: f32| (x.clamp(-1.0, 1.0) * max_val).clamp(-max_val, max_val - 1.0) as i32;
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(quantize(*l))?;
            writer.write_sample(quantize(*r))?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "wrote wav"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn spec(bits: u16) -> WavSpec {
        WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: bits,
        }
    }

    #[test]
    fn test_stereo_samples_from_mono() {
        let mono = vec![1.0, 2.0, 3.0];
        let stereo = StereoSamples::from_mono(mono.clone());
        assert_eq!(stereo.left, mono);
        assert_eq!(stereo.right, mono);
    }

    #[test]
    fn test_stereo_samples_interleaved() {
        let back = StereoSamples::from_interleaved(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(back.left, vec![1.0, 3.0]);
        assert_eq!(back.right, vec![2.0, 4.0]);
    }

    #[test]
    fn test_new_truncates_to_shorter() {
        let s = StereoSamples::new(vec![1.0, 2.0, 3.0], vec![4.0]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.left, vec![1.0]);
    }

    #[test]
    fn test_extend_silence() {
        let mut s = StereoSamples::new(vec![0.5], vec![-0.5]);
        s.extend_silence(3);
        assert_eq!(s.len(), 4);
        assert_eq!(s.right, vec![-0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stereo_roundtrip_f32() {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let right: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).cos()).collect();
        let samples = StereoSamples::new(left.clone(), right.clone());

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec(32)).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec, spec(32));
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_pcm_depths_quantize() {
        let samples = StereoSamples::new(vec![0.5, -0.25, 1.5], vec![-0.5, 0.125, -2.0]);
        for (bits, tolerance) in [(16, 1e-4), (24, 1e-6)] {
            let file = NamedTempFile::new().unwrap();
            write_wav_stereo(file.path(), &samples, spec(bits)).unwrap();
            let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
            assert_eq!(loaded_spec.bits_per_sample, bits);

            let expect_l = [0.5, -0.25, 1.0];
            let expect_r = [-0.5, 0.125, -1.0];
            for i in 0..3 {
                assert!((loaded.left[i] - expect_l[i]).abs() < tolerance, "{bits}-bit left {i}");
                assert!((loaded.right[i] - expect_r[i]).abs() < tolerance, "{bits}-bit right {i}");
            }
        }
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        let file = NamedTempFile::new().unwrap();
        let err = write_wav_stereo(file.path(), &StereoSamples::default(), spec(8)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)), "got {err}");
    }

    #[test]
    fn test_rejects_mismatched_channels() {
        let file = NamedTempFile::new().unwrap();
        let samples = StereoSamples {
            left: vec![0.0; 4],
            right: vec![0.0; 3],
        };
        let err = write_wav_stereo(file.path(), &samples, spec(16)).unwrap_err();
        assert!(matches!(err, Error::ChannelMismatch { left: 4, right: 3 }));
    }
}
