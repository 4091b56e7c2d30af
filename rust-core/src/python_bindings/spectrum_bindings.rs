//! Python bindings for the FFT engine and response analyzer

use numpy::{Complex64, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::filter_bindings::PyHilbertIir;
use crate::spectrum::{AnalyzerConfig, FftEngine, ResponseAnalyzer};

fn contiguous<'a>(array: &'a PyReadonlyArray1<Complex64>) -> PyResult<&'a [Complex64]> {
    array
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Power-of-two FFT exposed to Python
#[pyclass(name = "FftEngine")]
pub struct PyFftEngine {
    engine: FftEngine<f64>,
}

#[pymethods]
impl PyFftEngine {
    /// Create a new FFT engine
    ///
    /// Args:
    ///     max_size: Largest transform size (power of 2, 0 to grow on demand)
    #[new]
    #[pyo3(signature = (max_size=0))]
    fn new(max_size: usize) -> PyResult<Self> {
        let engine = if max_size == 0 {
            FftEngine::default()
        } else {
            FftEngine::new(max_size)?
        };
        Ok(Self { engine })
    }

    /// Forward transform of a complex128 array
    fn fft<'py>(&mut self, py: Python<'py>, signal: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<Complex64>> {
        let spectrum = self.engine.forward(contiguous(&signal)?)?;
        Ok(PyArray1::from_vec(py, spectrum))
    }

    /// Unnormalized inverse transform of a complex128 array
    fn ifft<'py>(&mut self, py: Python<'py>, spectrum: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<Complex64>> {
        let signal = self.engine.inverse(contiguous(&spectrum)?)?;
        Ok(PyArray1::from_vec(py, signal))
    }

    #[getter]
    fn max_size(&self) -> usize {
        self.engine.max_size()
    }
}

/// Impulse-response analyzer exposed to Python
#[pyclass(name = "ResponseAnalyzer")]
pub struct PyResponseAnalyzer {
    analyzer: ResponseAnalyzer<f64>,
}

#[pymethods]
impl PyResponseAnalyzer {
    /// Create a new response analyzer
    ///
    /// Args:
    ///     fft_size: FFT size (power of 2)
    ///     sample_rate: Sample rate in Hz
    ///     floor_db: Lowest reported level in dB
    #[new]
    #[pyo3(signature = (fft_size=32768, sample_rate=48000.0, floor_db=-120.0))]
    fn new(fft_size: usize, sample_rate: f64, floor_db: f64) -> PyResult<Self> {
        let config = AnalyzerConfig {
            fft_size,
            sample_rate,
            floor_db,
        };
        Ok(Self {
            analyzer: ResponseAnalyzer::new(config)?,
        })
    }

    /// Spectrum of a complex signal in dB, natural FFT order
    fn spectrum_db<'py>(&mut self, py: Python<'py>, signal: PyReadonlyArray1<Complex64>) -> PyResult<&'py PyArray1<f64>> {
        let levels = self.analyzer.spectrum_db(contiguous(&signal)?)?;
        Ok(PyArray1::from_vec(py, levels))
    }

    /// Measure a filter's impulse response
    ///
    /// Returns:
    ///     (frequencies_hz, levels_db) numpy arrays, recentred on DC
    fn measure<'py>(
        &mut self,
        py: Python<'py>,
        filter: PyRef<PyHilbertIir>,
        length: usize,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let points = self.analyzer.measure(&filter.filter, length)?;
        let (freqs, levels): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        Ok((PyArray1::from_vec(py, freqs), PyArray1::from_vec(py, levels)))
    }
}
