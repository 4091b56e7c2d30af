//! Error types shared by the FFT engine, filter bank and analyzer

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HilbertError {
    #[error("FFT size must be a power of two, got {0}")]
    InvalidFftSize(usize),

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("Channel count must be at least 1")]
    InvalidChannelCount,

    #[error("Channel {channel} out of range ({channels} channels configured)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("Passband gain must be finite, got {0}")]
    InvalidPassbandGain(f64),

    #[error("Frequency factor limit must be in (0, 0.5], got {0}")]
    InvalidFrequencyLimit(f64),

    #[error("Frame shape mismatch: expected {expected} channels, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, HilbertError>;
