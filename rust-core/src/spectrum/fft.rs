//! Power-of-two complex FFT engine
//!
//! Recursive decimation-in-time with a single shared twiddle table and a
//! ping-pong scratch buffer, so repeated transforms never allocate.

use crate::error::{HilbertError, Result};
use crate::sample::Sample;
use num_complex::Complex;
use std::f64::consts::PI;

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftDirection {
    Forward,
    Inverse,
}

/// Complex FFT engine for power-of-two sizes
#[derive(Debug, Clone, Default)]
pub struct FftEngine<T: Sample> {
    /// exp(-2πi·k/max_size) for k = 0..max_size/2
    twiddles: Vec<Complex<T>>,

    /// Scratch buffer, length max_size
    working: Vec<Complex<T>>,
}

impl<T: Sample> FftEngine<T> {
    /// Create an engine able to transform any power-of-two size up to `max_size`
    ///
    /// # Arguments
    /// * `max_size` - Largest transform size (power of two)
    pub fn new(max_size: usize) -> Result<Self> {
        let mut engine = Self {
            twiddles: Vec::new(),
            working: Vec::new(),
        };
        engine.resize(max_size)?;
        Ok(engine)
    }

    /// Rebuild the twiddle table and scratch buffer for a new maximum size
    pub fn resize(&mut self, max_size: usize) -> Result<()> {
        if !max_size.is_power_of_two() {
            return Err(HilbertError::InvalidFftSize(max_size));
        }

        log::debug!("Building FFT twiddle table for max size {}", max_size);

        // Phases computed in double precision regardless of T
        self.twiddles = (0..max_size / 2)
            .map(|i| {
                let phase = -2.0 * PI * i as f64 / max_size as f64;
                Complex::new(T::from_f64(phase.cos()), T::from_f64(phase.sin()))
            })
            .collect();
        self.working = vec![Complex::new(T::zero(), T::zero()); max_size];

        Ok(())
    }

    /// Largest size the current twiddle table covers
    pub fn max_size(&self) -> usize {
        self.working.len()
    }

    /// Forward transform: out[k] = Σ in[n]·exp(-2πi·nk/N)
    ///
    /// # Arguments
    /// * `input` - Time-domain samples (length N, a power of two)
    /// * `output` - Spectrum destination (length N)
    pub fn fft(&mut self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<()> {
        self.transform(FftDirection::Forward, input, output)
    }

    /// Inverse transform (unnormalized: divide by N to recover the input)
    pub fn ifft(&mut self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<()> {
        self.transform(FftDirection::Inverse, input, output)
    }

    /// Forward transform into a newly allocated vector
    pub fn forward(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let mut output = vec![Complex::new(T::zero(), T::zero()); input.len()];
        self.fft(input, &mut output)?;
        Ok(output)
    }

    /// Inverse transform into a newly allocated vector
    pub fn inverse(&mut self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>> {
        let mut output = vec![Complex::new(T::zero(), T::zero()); input.len()];
        self.ifft(input, &mut output)?;
        Ok(output)
    }

    /// Transform in the given direction
    pub fn transform(
        &mut self,
        direction: FftDirection,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<()> {
        let size = input.len();
        if !size.is_power_of_two() {
            return Err(HilbertError::InvalidFftSize(size));
        }
        if output.len() != size {
            return Err(HilbertError::LengthMismatch {
                expected: size,
                actual: output.len(),
            });
        }

        if size == 1 {
            output[0] = input[0];
            return Ok(());
        }

        if size > self.max_size() {
            self.resize(size)?;
        }

        let working = &mut self.working[..size];
        fft_pass(&self.twiddles, direction, size, 1, input, output, working);

        Ok(())
    }
}

/// Compute a `size`-point FFT where each element is a block of `stride` values
///
/// Doubling the stride views the data as `size/2` blocks holding one even and
/// one odd element each, so both half-size FFTs run in a single pass. The
/// result of that pass lands in `working`, and the combine writes `output`.
fn fft_pass<T: Sample>(
    twiddles: &[Complex<T>],
    direction: FftDirection,
    size: usize,
    stride: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
    working: &mut [Complex<T>],
) {
    if size > 2 {
        // Buffers swap roles one level down
        fft_pass(twiddles, direction, size / 2, stride * 2, input, working, output);
        combine2(twiddles, direction, size, stride, working, output);
    } else {
        // The input can already be considered a 1-point FFT
        combine2(twiddles, direction, size, stride, input, output);
    }
}

/// Combine interleaved even/odd half-spectra into one spectrum
fn combine2<T: Sample>(
    twiddles: &[Complex<T>],
    direction: FftDirection,
    size: usize,
    stride: usize,
    input: &[Complex<T>],
    output: &mut [Complex<T>],
) {
    let half = size / 2;
    // One master table serves every level: the step shrinks as size grows
    let twiddle_step = twiddles.len() * 2 / size;

    for i in 0..half {
        let twiddle = match direction {
            FftDirection::Forward => twiddles[i * twiddle_step],
            FftDirection::Inverse => twiddles[i * twiddle_step].conj(),
        };

        let even = 2 * i * stride;
        let odd = (2 * i + 1) * stride;
        let low = i * stride;
        let high = (i + half) * stride;

        for s in 0..stride {
            let a = input[even + s];
            let b = input[odd + s] * twiddle;
            output[low + s] = a + b;
            output[high + s] = a - b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use proptest::prelude::*;
    use rustfft::FftPlanner;

    fn impulse(size: usize, position: usize) -> Vec<Complex64> {
        let mut signal = vec![Complex64::new(0.0, 0.0); size];
        signal[position] = Complex64::new(1.0, 0.0);
        signal
    }

    fn max_error(a: &[Complex64], b: &[Complex64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_impulse_gives_flat_spectrum() {
        let mut fft = FftEngine::<f64>::new(32768).unwrap();

        let mut size = 1;
        while size <= 32768 {
            let spectrum = fft.forward(&impulse(size, 0)).unwrap();
            assert_eq!(spectrum.len(), size);
            for (k, bin) in spectrum.iter().enumerate() {
                assert!(
                    (bin - Complex64::new(1.0, 0.0)).norm() < 1e-9,
                    "size {} bin {}: {}", size, k, bin
                );
            }
            size *= 2;
        }
    }

    #[test]
    fn test_shifted_impulse_has_unit_magnitude() {
        let mut fft = FftEngine::<f64>::new(256).unwrap();
        let spectrum = fft.forward(&impulse(256, 3)).unwrap();

        for (k, bin) in spectrum.iter().enumerate() {
            assert!((bin.norm() - 1.0).abs() < 1e-9);

            // Delay by 3 samples is a linear phase ramp
            let expected = Complex64::from_polar(1.0, -2.0 * PI * 3.0 * k as f64 / 256.0);
            assert!((bin - expected).norm() < 1e-9, "bin {}", k);
        }
    }

    #[test]
    fn test_single_sine_lands_in_one_bin() {
        let mut fft = FftEngine::<f64>::new(64).unwrap();
        let signal: Vec<Complex64> = (0..64)
            .map(|n| Complex64::from_polar(1.0, 2.0 * PI * 5.0 * n as f64 / 64.0))
            .collect();

        let spectrum = fft.forward(&signal).unwrap();

        assert!((spectrum[5] - Complex64::new(64.0, 0.0)).norm() < 1e-9);
        for (k, bin) in spectrum.iter().enumerate() {
            if k != 5 {
                assert!(bin.norm() < 1e-9, "leakage into bin {}", k);
            }
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let mut fft = FftEngine::<f64>::new(1024).unwrap();
        let mut planner = FftPlanner::<f64>::new();

        for &size in &[2usize, 4, 8, 64, 512, 1024] {
            let signal: Vec<Complex64> = (0..size)
                .map(|n| Complex64::new((n as f64 * 0.37).sin(), (n as f64 * 0.11).cos()))
                .collect();

            let ours = fft.forward(&signal).unwrap();

            let mut reference = signal.clone();
            planner.plan_fft_forward(size).process(&mut reference);
            assert!(max_error(&ours, &reference) < 1e-9, "forward size {}", size);

            let ours_inv = fft.inverse(&signal).unwrap();
            let mut reference_inv = signal.clone();
            planner.plan_fft_inverse(size).process(&mut reference_inv);
            assert!(max_error(&ours_inv, &reference_inv) < 1e-9, "inverse size {}", size);
        }
    }

    #[test]
    fn test_smaller_sizes_reuse_table() {
        // Table built for 4096 must serve a 16-point transform
        let mut fft = FftEngine::<f64>::new(4096).unwrap();
        let signal: Vec<Complex64> = (0..16).map(|n| Complex64::new(n as f64, 0.0)).collect();

        let spectrum = fft.forward(&signal).unwrap();
        assert_eq!(fft.max_size(), 4096);

        // DC bin holds the sum 0 + 1 + ... + 15
        assert!((spectrum[0] - Complex64::new(120.0, 0.0)).norm() < 1e-9);
        // Bin 8 alternates signs: -8
        assert!((spectrum[8] - Complex64::new(-8.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_grows_when_size_exceeds_capacity() {
        let mut fft = FftEngine::<f64>::default();
        assert_eq!(fft.max_size(), 0);

        let spectrum = fft.forward(&impulse(128, 0)).unwrap();
        assert_eq!(fft.max_size(), 128);
        assert!(spectrum.iter().all(|b| (b.re - 1.0).abs() < 1e-12 && b.im.abs() < 1e-12));
    }

    #[test]
    fn test_size_one_is_identity() {
        let mut fft = FftEngine::<f64>::default();
        let x = [Complex64::new(0.25, -3.0)];
        assert_eq!(fft.forward(&x).unwrap(), x.to_vec());
        assert_eq!(fft.inverse(&x).unwrap(), x.to_vec());
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert_eq!(
            FftEngine::<f64>::new(1000).unwrap_err(),
            HilbertError::InvalidFftSize(1000)
        );
        assert_eq!(
            FftEngine::<f64>::new(0).unwrap_err(),
            HilbertError::InvalidFftSize(0)
        );

        let mut fft = FftEngine::<f64>::new(64).unwrap();
        let signal = vec![Complex64::new(1.0, 0.0); 12];
        assert_eq!(fft.forward(&signal).unwrap_err(), HilbertError::InvalidFftSize(12));
        assert_eq!(fft.forward(&[]).unwrap_err(), HilbertError::InvalidFftSize(0));

        let mut short = vec![Complex64::new(0.0, 0.0); 8];
        assert_eq!(
            fft.fft(&impulse(16, 0), &mut short).unwrap_err(),
            HilbertError::LengthMismatch { expected: 16, actual: 8 }
        );
    }

    #[test]
    fn test_single_precision() {
        let mut fft = FftEngine::<f32>::new(1024).unwrap();
        let mut signal = vec![Complex::new(0.0f32, 0.0); 1024];
        signal[0] = Complex::new(1.0, 0.0);

        let spectrum = fft.forward(&signal).unwrap();
        let restored = fft.inverse(&spectrum).unwrap();

        assert!(spectrum.iter().all(|b| (b.norm() - 1.0).abs() < 1e-5));
        assert!((restored[0].re / 1024.0 - 1.0).abs() < 1e-5);
        assert!(restored[1..].iter().all(|x| x.norm() / 1024.0 < 1e-5));
    }

    fn complex_signal(max_len_log2: u32) -> impl Strategy<Value = Vec<Complex64>> {
        (0..=max_len_log2).prop_flat_map(|log2| {
            proptest::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1usize << log2)
                .prop_map(|pairs| pairs.into_iter().map(|(re, im)| Complex64::new(re, im)).collect())
        })
    }

    proptest! {
        #[test]
        fn prop_round_trip(signal in complex_signal(10)) {
            let mut fft = FftEngine::<f64>::new(1024).unwrap();
            let n = signal.len() as f64;

            let spectrum = fft.forward(&signal).unwrap();
            let restored: Vec<Complex64> = fft
                .inverse(&spectrum)
                .unwrap()
                .into_iter()
                .map(|x| x / n)
                .collect();

            prop_assert!(max_error(&restored, &signal) < 1e-9);
        }

        #[test]
        fn prop_linearity(
            pair in (0u32..=8).prop_flat_map(|log2| {
                let len = 1usize << log2;
                (
                    proptest::collection::vec(-10.0f64..10.0, len),
                    proptest::collection::vec(-10.0f64..10.0, len),
                )
            }),
            a in -5.0f64..5.0,
            b in -5.0f64..5.0,
        ) {
            let (xs, ys) = pair;
            let x: Vec<Complex64> = xs.iter().map(|&v| Complex64::new(v, 0.5 * v)).collect();
            let y: Vec<Complex64> = ys.iter().map(|&v| Complex64::new(-v, v)).collect();
            let mixed: Vec<Complex64> = x.iter().zip(y.iter()).map(|(&p, &q)| p * a + q * b).collect();

            let mut fft = FftEngine::<f64>::new(256).unwrap();
            let fx = fft.forward(&x).unwrap();
            let fy = fft.forward(&y).unwrap();
            let fmixed = fft.forward(&mixed).unwrap();
            let expected: Vec<Complex64> = fx.iter().zip(fy.iter()).map(|(&p, &q)| p * a + q * b).collect();

            prop_assert!(max_error(&fmixed, &expected) < 1e-8);
        }
    }
}
