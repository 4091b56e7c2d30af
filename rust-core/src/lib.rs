//! Hilbert IIR - Broadband Analytic-Signal Filter Core
//!
//! Parallel one-pole IIR Hilbert transformer with a power-of-two FFT for
//! checking its frequency response. Python bindings behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod filters;
pub mod sample;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{HilbertError, Result};
pub use filters::{HilbertConfig, HilbertIir};
pub use sample::Sample;
pub use spectrum::{FftEngine, ResponseAnalyzer};
