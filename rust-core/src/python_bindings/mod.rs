//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::HilbertError;

mod filter_bindings;
mod spectrum_bindings;

impl From<HilbertError> for PyErr {
    fn from(err: HilbertError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn hilbert_iir(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyHilbertIir>()?;
    m.add_class::<spectrum_bindings::PyFftEngine>()?;
    m.add_class::<spectrum_bindings::PyResponseAnalyzer>()?;

    m.add("HILBERT_ORDER", crate::filters::HILBERT_ORDER)?;

    Ok(())
}
