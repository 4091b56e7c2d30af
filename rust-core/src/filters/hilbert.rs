//! Broadband IIR Hilbert transformer
//!
//! A bank of complex one-pole sections run in parallel plus a direct path.
//! Feeding a real signal yields an approximation of its analytic signal:
//! positive frequencies pass at the passband gain, negative frequencies are
//! rejected, and the imaginary part lags the real part by 90°.

use super::design::{HilbertDesign, DEFAULT_MAX_FREQUENCY_FACTOR, ELLIPTIC_12, HILBERT_ORDER};
use crate::error::{HilbertError, Result};
use crate::sample::Sample;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex;
use std::f64::consts::PI;

/// Filter bank configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HilbertConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Number of independent channels
    pub channels: usize,

    /// In-band output level (1.0 = unity on positive frequencies)
    pub passband_gain: f64,

    /// Upper clamp for the frequency factor
    pub max_frequency_factor: f64,
}

impl Default for HilbertConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            channels: 1,
            passband_gain: 1.0,
            max_frequency_factor: DEFAULT_MAX_FREQUENCY_FACTOR,
        }
    }
}

impl HilbertConfig {
    fn validate(&self) -> Result<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(HilbertError::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(HilbertError::InvalidChannelCount);
        }
        if !self.passband_gain.is_finite() {
            return Err(HilbertError::InvalidPassbandGain(self.passband_gain));
        }
        if !(self.max_frequency_factor > 0.0 && self.max_frequency_factor <= 0.5) {
            return Err(HilbertError::InvalidFrequencyLimit(self.max_frequency_factor));
        }
        Ok(())
    }
}

/// Recursive state of one channel, split into real and imaginary parts
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelState<T> {
    real: [T; HILBERT_ORDER],
    imag: [T; HILBERT_ORDER],
}

impl<T: Sample> ChannelState<T> {
    fn zeroed() -> Self {
        Self {
            real: [T::zero(); HILBERT_ORDER],
            imag: [T::zero(); HILBERT_ORDER],
        }
    }
}

/// Per-instance section coefficients, already mapped to the sample rate
#[derive(Debug, Clone)]
struct Sections<T> {
    coeffs_re: [T; HILBERT_ORDER],
    coeffs_im: [T; HILBERT_ORDER],
    poles_re: [T; HILBERT_ORDER],
    poles_im: [T; HILBERT_ORDER],
    direct: T,
}

impl<T: Sample> Sections<T> {
    /// Advance one time step: s[i] = s[i]*pole[i] + x*coeff[i]
    ///
    /// Every section reads only its own previous state, so updating in place
    /// is equivalent to updating from a shared snapshot.
    #[inline]
    fn advance(&self, state: &mut ChannelState<T>, x: Complex<T>) -> Complex<T> {
        // Complex products unrolled into real arithmetic
        let mut sum_re = x.re * self.direct;
        let mut sum_im = x.im * self.direct;

        for i in 0..HILBERT_ORDER {
            let (s_re, s_im) = (state.real[i], state.imag[i]);
            let (p_re, p_im) = (self.poles_re[i], self.poles_im[i]);
            let (c_re, c_im) = (self.coeffs_re[i], self.coeffs_im[i]);

            let new_re = s_re * p_re - s_im * p_im + x.re * c_re - x.im * c_im;
            let new_im = s_re * p_im + s_im * p_re + x.re * c_im + x.im * c_re;

            state.real[i] = new_re;
            state.imag[i] = new_im;
            sum_re = sum_re + new_re;
            sum_im = sum_im + new_im;
        }

        Complex::new(sum_re, sum_im)
    }
}

/// Multi-channel IIR Hilbert transformer
#[derive(Debug, Clone)]
pub struct HilbertIir<T: Sample> {
    config: HilbertConfig,
    frequency_factor: T,
    sections: Sections<T>,
    states: Vec<ChannelState<T>>,
}

impl<T: Sample> HilbertIir<T> {
    /// Create a filter bank with unity passband gain
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `channels` - Number of independent channels
    pub fn new(sample_rate: f64, channels: usize) -> Result<Self> {
        Self::with_config(HilbertConfig {
            sample_rate,
            channels,
            ..HilbertConfig::default()
        })
    }

    /// Create a filter bank from a full configuration
    pub fn with_config(config: HilbertConfig) -> Result<Self> {
        Self::with_design(&ELLIPTIC_12, config)
    }

    /// Create a filter bank from an explicit design preset
    ///
    /// # Arguments
    /// * `design` - Frozen coefficient/pole tables
    /// * `config` - Sample rate, channels, gain and clamp
    pub fn with_design(design: &HilbertDesign, config: HilbertConfig) -> Result<Self> {
        config.validate()?;

        let freq_factor =
            HilbertDesign::frequency_factor(config.sample_rate, config.max_frequency_factor);
        let coeff_gain = config.passband_gain * freq_factor;

        let mut sections = Sections {
            coeffs_re: [T::zero(); HILBERT_ORDER],
            coeffs_im: [T::zero(); HILBERT_ORDER],
            poles_re: [T::zero(); HILBERT_ORDER],
            poles_im: [T::zero(); HILBERT_ORDER],
            direct: T::from_f64(design.direct * 2.0 * config.passband_gain * freq_factor),
        };

        for i in 0..HILBERT_ORDER {
            let coeff = design.coeffs[i] * coeff_gain;
            sections.coeffs_re[i] = T::from_f64(coeff.re);
            sections.coeffs_im[i] = T::from_f64(coeff.im);

            // Continuous-time pole to discrete-time pole
            let pole = (design.poles[i] * freq_factor).exp();
            sections.poles_re[i] = T::from_f64(pole.re);
            sections.poles_im[i] = T::from_f64(pole.im);
        }

        log::debug!(
            "Hilbert bank '{}': {} Hz, {} channel(s), frequency factor {:.4}",
            design.name,
            config.sample_rate,
            config.channels,
            freq_factor
        );

        let states = vec![ChannelState::zeroed(); config.channels];

        Ok(Self {
            config,
            frequency_factor: T::from_f64(freq_factor),
            sections,
            states,
        })
    }

    /// Clear every channel's recursive state
    pub fn reset(&mut self) {
        for state in self.states.iter_mut() {
            *state = ChannelState::zeroed();
        }
    }

    /// Process a single real sample on one channel
    ///
    /// Calls must arrive in time order per channel.
    ///
    /// # Returns
    /// Analytic-signal output for this time step
    #[inline]
    pub fn process(&mut self, x: T, channel: usize) -> Result<Complex<T>> {
        self.process_complex(Complex::new(x, T::zero()), channel)
    }

    /// Process a single complex sample on one channel
    #[inline]
    pub fn process_complex(&mut self, x: Complex<T>, channel: usize) -> Result<Complex<T>> {
        let state = state_slot(&mut self.states, channel)?;
        Ok(self.sections.advance(state, x))
    }

    /// Process a block of real samples on one channel
    pub fn process_block(&mut self, input: &[T], channel: usize) -> Result<Vec<Complex<T>>> {
        let state = state_slot(&mut self.states, channel)?;
        Ok(input
            .iter()
            .map(|&x| self.sections.advance(state, Complex::new(x, T::zero())))
            .collect())
    }

    /// Process a block of complex samples on one channel
    pub fn process_block_complex(
        &mut self,
        input: &[Complex<T>],
        channel: usize,
    ) -> Result<Vec<Complex<T>>> {
        let state = state_slot(&mut self.states, channel)?;
        Ok(input.iter().map(|&x| self.sections.advance(state, x)).collect())
    }

    /// Process one block for every channel at once
    ///
    /// # Arguments
    /// * `input` - Real samples, one row per channel, columns in time order
    ///
    /// # Returns
    /// Complex output with the same shape as `input`
    pub fn process_frames(&mut self, input: ArrayView2<T>) -> Result<Array2<Complex<T>>> {
        let (rows, frames) = input.dim();
        if rows != self.states.len() {
            return Err(HilbertError::ShapeMismatch {
                expected: self.states.len(),
                actual: rows,
            });
        }

        let mut output = Array2::from_elem((rows, frames), Complex::new(T::zero(), T::zero()));
        let sections = &self.sections;

        for ((in_row, mut out_row), state) in input
            .outer_iter()
            .zip(output.outer_iter_mut())
            .zip(self.states.iter_mut())
        {
            for (&x, y) in in_row.iter().zip(out_row.iter_mut()) {
                *y = sections.advance(state, Complex::new(x, T::zero()));
            }
        }

        Ok(output)
    }

    /// Response to a unit impulse, computed from a fresh state
    ///
    /// Channel states are left untouched.
    pub fn impulse_response(&self, length: usize) -> Vec<Complex<T>> {
        let mut state = ChannelState::zeroed();
        (0..length)
            .map(|n| {
                let x = if n == 0 { T::one() } else { T::zero() };
                self.sections.advance(&mut state, Complex::new(x, T::zero()))
            })
            .collect()
    }

    /// Evaluate H(e^jω) = direct + Σ coeff[i] / (1 - pole[i]·e^-jω)
    ///
    /// # Arguments
    /// * `frequency_hz` - Frequency in Hz (negative for the lower half)
    pub fn frequency_response(&self, frequency_hz: f64) -> Complex<T> {
        let omega = T::from_f64(2.0 * PI * frequency_hz / self.config.sample_rate);
        let delay = Complex::new(T::zero(), -omega).exp();
        let one = Complex::new(T::one(), T::zero());

        let mut response = Complex::new(self.sections.direct, T::zero());
        for i in 0..HILBERT_ORDER {
            let coeff = Complex::new(self.sections.coeffs_re[i], self.sections.coeffs_im[i]);
            let pole = Complex::new(self.sections.poles_re[i], self.sections.poles_im[i]);
            response = response + coeff / (one - pole * delay);
        }
        response
    }

    /// Snapshot of one channel's section states
    pub fn state(&self, channel: usize) -> Result<[Complex<T>; HILBERT_ORDER]> {
        let state = self
            .states
            .get(channel)
            .ok_or(HilbertError::ChannelOutOfRange {
                channel,
                channels: self.states.len(),
            })?;

        let mut snapshot = [Complex::new(T::zero(), T::zero()); HILBERT_ORDER];
        for (i, value) in snapshot.iter_mut().enumerate() {
            *value = Complex::new(state.real[i], state.imag[i]);
        }
        Ok(snapshot)
    }

    /// Get configuration
    pub fn config(&self) -> &HilbertConfig {
        &self.config
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.states.len()
    }

    /// Passband gain
    pub fn passband_gain(&self) -> f64 {
        self.config.passband_gain
    }

    /// Frequency factor after clamping
    pub fn frequency_factor(&self) -> T {
        self.frequency_factor
    }

    /// Number of parallel sections
    pub fn order() -> usize {
        HILBERT_ORDER
    }
}

fn state_slot<T>(states: &mut [ChannelState<T>], channel: usize) -> Result<&mut ChannelState<T>> {
    let channels = states.len();
    states
        .get_mut(channel)
        .ok_or(HilbertError::ChannelOutOfRange { channel, channels })
}
