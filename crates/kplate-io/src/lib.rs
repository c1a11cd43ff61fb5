//! Stereo WAV file I/O for kplate.
//!
//! - [`read_wav_stereo`] loads any PCM or float WAV as a left/right pair
//!   (mono is duplicated, extra channels are dropped)
//! - [`write_wav_stereo`] saves a pair as 16- or 24-bit PCM or 32-bit float
//! - [`read_wav_info`] reads the header only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kplate_core::Effect;
//! use kplate_effects::PlateReverb;
//! use kplate_io::{read_wav_stereo, write_wav_stereo};
//!
//! let (mut samples, spec) = read_wav_stereo("dry.wav")?;
//! let mut plate = PlateReverb::new(spec.sample_rate as f32);
//! let (l, r) = (samples.left.clone(), samples.right.clone());
//! plate.process_block_stereo(&l, &r, &mut samples.left, &mut samples.right);
//! write_wav_stereo("wet.wav", &samples, spec)?;
//! ```

mod wav;

pub use wav::{
    StereoSamples, SUPPORTED_BIT_DEPTHS, WavFormat, WavInfo, WavSpec, read_wav_info,
    read_wav_stereo, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Left and right channels differ in length.
    #[error("channel length mismatch: left has {left} samples, right has {right}")]
    ChannelMismatch {
        /// Left channel length.
        left: usize,
        /// Right channel length.
        right: usize,
    },

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
