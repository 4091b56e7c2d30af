//! Floating-point sample types accepted by the kernels

use num_traits::{Float, FloatConst};
use std::fmt::Debug;

/// Scalar type for the FFT engine and filter bank (`f32` or `f64`)
///
/// Design tables are stored in double precision and narrowed once at
/// construction, so no per-sample conversions happen in the hot loops.
pub trait Sample: Float + FloatConst + Debug + Default + Send + Sync + 'static {
    /// Convert a double-precision design constant
    fn from_f64(value: f64) -> Self;

    /// Widen to double precision (for logging and error reporting)
    fn as_f64(self) -> f64;
}

impl Sample for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}
