//! Spectral analysis with FFT

pub mod fft;
pub mod analysis;

pub use fft::{FftDirection, FftEngine};
pub use analysis::{AnalyzerConfig, ResponseAnalyzer};
