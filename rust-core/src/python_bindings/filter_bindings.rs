//! Python bindings for the Hilbert filter bank

use numpy::{Complex64, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::filters::{HilbertConfig, HilbertIir};

/// IIR Hilbert transformer exposed to Python
#[pyclass(name = "HilbertIIR")]
pub struct PyHilbertIir {
    pub(crate) filter: HilbertIir<f64>,
}

#[pymethods]
impl PyHilbertIir {
    /// Create a new Hilbert filter bank
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     channels: Number of independent channels
    ///     passband_gain: In-band output level
    #[new]
    #[pyo3(signature = (sample_rate=48000.0, channels=1, passband_gain=1.0))]
    fn new(sample_rate: f64, channels: usize, passband_gain: f64) -> PyResult<Self> {
        let config = HilbertConfig {
            sample_rate,
            channels,
            passband_gain,
            ..HilbertConfig::default()
        };

        Ok(Self {
            filter: HilbertIir::with_config(config)?,
        })
    }

    /// Process one real sample
    ///
    /// Returns:
    ///     (real, imag) tuple
    #[pyo3(signature = (x, channel=0))]
    fn process(&mut self, x: f64, channel: usize) -> PyResult<(f64, f64)> {
        let y = self.filter.process(x, channel)?;
        Ok((y.re, y.im))
    }

    /// Process a block of real samples on one channel
    ///
    /// Args:
    ///     input_signal: Input samples as numpy array
    ///     channel: Channel index
    ///
    /// Returns:
    ///     Complex128 numpy array
    #[pyo3(signature = (input_signal, channel=0))]
    fn process_block<'py>(
        &mut self,
        py: Python<'py>,
        input_signal: PyReadonlyArray1<f64>,
        channel: usize,
    ) -> PyResult<&'py PyArray1<Complex64>> {
        let input = input_signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let output = self.filter.process_block(input, channel)?;

        Ok(PyArray1::from_vec(py, output))
    }

    /// Process a (channels, frames) array
    fn process_frames<'py>(
        &mut self,
        py: Python<'py>,
        frames: PyReadonlyArray2<f64>,
    ) -> PyResult<&'py PyArray2<Complex64>> {
        let output = self.filter.process_frames(frames.as_array())?;
        Ok(PyArray2::from_owned_array(py, output))
    }

    /// Reset all channel states
    fn reset(&mut self) {
        self.filter.reset();
    }

    /// Impulse response from a fresh state
    fn impulse_response<'py>(&self, py: Python<'py>, length: usize) -> PyResult<&'py PyArray1<Complex64>> {
        Ok(PyArray1::from_vec(py, self.filter.impulse_response(length)))
    }

    /// Complex frequency response at a frequency in Hz
    fn frequency_response(&self, frequency_hz: f64) -> (f64, f64) {
        let h = self.filter.frequency_response(frequency_hz);
        (h.re, h.im)
    }

    #[getter]
    fn sample_rate(&self) -> f64 {
        self.filter.sample_rate()
    }

    #[getter]
    fn channels(&self) -> usize {
        self.filter.channels()
    }

    #[getter]
    fn frequency_factor(&self) -> f64 {
        self.filter.frequency_factor()
    }
}
