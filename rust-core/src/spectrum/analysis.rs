//! Frequency-response analysis of impulse responses
//!
//! Runs a (complex) impulse response through the FFT engine and reports
//! power in dB against a frequency axis recentred on DC, so positive and
//! negative frequencies of an analytic filter can be inspected side by side.

use super::fft::FftEngine;
use crate::error::{HilbertError, Result};
use crate::filters::HilbertIir;
use crate::sample::Sample;
use num_complex::Complex;

/// Added to |X|² before taking the log
pub const POWER_EPSILON: f64 = 1e-30;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// FFT size (power of 2)
    pub fft_size: usize,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Lowest reported level in dB
    pub floor_db: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 32768,
            sample_rate: 48000.0,
            floor_db: -120.0,
        }
    }
}

/// Power of one bin in dB: max(floor, 10·log10(|X|² + ε))
pub fn power_db<T: Sample>(bin: Complex<T>, floor_db: f64) -> f64 {
    let power = bin.re.as_f64().powi(2) + bin.im.as_f64().powi(2);
    (10.0 * (power + POWER_EPSILON).log10()).max(floor_db)
}

/// Impulse-response analyzer
pub struct ResponseAnalyzer<T: Sample> {
    config: AnalyzerConfig,
    fft_engine: FftEngine<T>,

    /// Zero-padded copy of the signal being analyzed
    input_buffer: Vec<Complex<T>>,
}

impl<T: Sample> ResponseAnalyzer<T> {
    /// Create new analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
            return Err(HilbertError::InvalidSampleRate(config.sample_rate));
        }
        let fft_engine = FftEngine::new(config.fft_size)?;
        let input_buffer = vec![Complex::new(T::zero(), T::zero()); config.fft_size];

        Ok(Self {
            config,
            fft_engine,
            input_buffer,
        })
    }

    /// Complex spectrum of a signal
    ///
    /// # Arguments
    /// * `signal` - Time-domain samples (zero-padded or truncated to fft_size)
    ///
    /// # Returns
    /// All fft_size bins in natural FFT order (DC first)
    pub fn spectrum(&mut self, signal: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let size = self.config.fft_size;
        let copy_len = signal.len().min(size);
        if signal.len() != size {
            log::trace!("Fitting {} samples to FFT size {}", signal.len(), size);
        }

        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(Complex::new(T::zero(), T::zero()));

        self.fft_engine.forward(&self.input_buffer)
    }

    /// Spectrum in dB per bin, natural FFT order
    pub fn spectrum_db(&mut self, signal: &[Complex<T>]) -> Result<Vec<f64>> {
        let floor_db = self.config.floor_db;
        Ok(self
            .spectrum(signal)?
            .into_iter()
            .map(|bin| power_db(bin, floor_db))
            .collect())
    }

    /// Frequencies in Hz from -fs/2 up to fs/2 - fs/N
    pub fn frequency_axis(&self) -> Vec<f64> {
        let n = self.config.fft_size;
        (0..n)
            .map(|i| (i as f64 - (n / 2) as f64) * self.config.sample_rate / n as f64)
            .collect()
    }

    /// Recentred (frequency, dB) pairs ready for plotting
    pub fn response_points(&mut self, signal: &[Complex<T>]) -> Result<Vec<(f64, f64)>> {
        let n = self.config.fft_size;
        let levels = self.spectrum_db(signal)?;

        Ok(self
            .frequency_axis()
            .into_iter()
            .enumerate()
            .map(|(i, freq)| (freq, levels[(i + n / 2) % n]))
            .collect())
    }

    /// Impulse response of `filter` followed by `response_points`
    ///
    /// # Arguments
    /// * `filter` - Filter bank (its channel states are not touched)
    /// * `length` - Number of impulse-response samples to compute
    pub fn measure(&mut self, filter: &HilbertIir<T>, length: usize) -> Result<Vec<(f64, f64)>> {
        let response = filter.impulse_response(length);
        self.response_points(&response)
    }

    /// Phase of FFT(imag) relative to FFT(real) at the bin nearest `frequency_hz`
    ///
    /// An ideal analytic response gives -90° on positive frequencies.
    pub fn quadrature_phase_deg(&mut self, signal: &[Complex<T>], frequency_hz: f64) -> Result<f64> {
        let bin = self.bin_for_frequency(frequency_hz);

        let real: Vec<Complex<T>> = signal.iter().map(|s| Complex::new(s.re, T::zero())).collect();
        let imag: Vec<Complex<T>> = signal.iter().map(|s| Complex::new(s.im, T::zero())).collect();

        let real_bin = self.spectrum(&real)?[bin];
        let imag_bin = self.spectrum(&imag)?[bin];

        Ok((imag_bin / real_bin).arg().as_f64().to_degrees())
    }

    /// Nearest FFT bin for a frequency; negative frequencies wrap to the top half
    pub fn bin_for_frequency(&self, frequency_hz: f64) -> usize {
        let n = self.config.fft_size as i64;
        let bin = (frequency_hz * n as f64 / self.config.sample_rate).round() as i64;
        bin.rem_euclid(n) as usize
    }

    /// Signed frequency of an FFT bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        let n = self.config.fft_size;
        let signed = if bin < n / 2 {
            bin as f64
        } else {
            bin as f64 - n as f64
        };
        signed * self.config.sample_rate / n as f64
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}
