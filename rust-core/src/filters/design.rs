//! Frozen Hilbert filter designs
//!
//! Partial-fraction expansion of a 12th-order elliptic prototype, shifted so
//! its passband covers positive frequencies only. The continuous-time design
//! is tuned so that a frequency factor of 1 puts the upper band edge at
//! 2π rad/s; `HilbertIir` maps it onto the actual sample rate.

use num_complex::Complex64;

/// Number of parallel one-pole sections
pub const HILBERT_ORDER: usize = 12;

/// Upper edge of the design passband in Hz, used to derive the frequency factor
pub const DESIGN_BANDWIDTH_HZ: f64 = 20000.0;

/// Frequency factor limit used by current designs
pub const DEFAULT_MAX_FREQUENCY_FACTOR: f64 = 0.46;

/// Limit used by an earlier revision (upper band edge right at Nyquist)
pub const LEGACY_MAX_FREQUENCY_FACTOR: f64 = 0.5;

/// Coefficient set for the parallel one-pole bank
#[derive(Debug, Clone, PartialEq)]
pub struct HilbertDesign {
    /// Preset identifier
    pub name: &'static str,

    /// Residues (section input gains)
    pub coeffs: [Complex64; HILBERT_ORDER],

    /// Continuous-time poles, before mapping with exp()
    pub poles: [Complex64; HILBERT_ORDER],

    /// Direct-path feedthrough gain
    pub direct: f64,
}

/// 12th-order elliptic design: 0.5 dB ripple, 90 dB stopband prototype
pub const ELLIPTIC_12: HilbertDesign = HilbertDesign {
    name: "elliptic-12",
    coeffs: [
        Complex64::new(-0.000224352093802, 0.00543499018201),
        Complex64::new(0.0107500557815, -0.0173890685681),
        Complex64::new(-0.0456795873917, 0.0229166931429),
        Complex64::new(0.11282500582, 0.00278413661237),
        Complex64::new(-0.208067578452, -0.104628958675),
        Complex64::new(0.28717837501, 0.33619239719),
        Complex64::new(-0.254675294431, -0.683033899655),
        Complex64::new(0.0481081835038, 0.954061589374),
        Complex64::new(0.227861357868, -0.891273574562),
        Complex64::new(-0.365411839149, 0.525088317279),
        Complex64::new(0.280729061125, -0.155131206624),
        Complex64::new(-0.0935061787568, 0.00512245855511),
    ],
    poles: [
        Complex64::new(-0.00495335976478, -0.000742012312798),
        Complex64::new(-0.017859491302, 0.0173493725543),
        Complex64::new(-0.0413714373155, 0.0644756910287),
        Complex64::new(-0.0882148408885, 0.168349677457),
        Complex64::new(-0.17922965812, 0.38601340223),
        Complex64::new(-0.338261800753, 0.819229533354),
        Complex64::new(-0.557688699732, 1.60298538328),
        Complex64::new(-0.735157736147, 2.78987398682),
        Complex64::new(-0.719057381177, 4.15396166127),
        Complex64::new(-0.517871025196, 5.28724826806),
        Complex64::new(-0.280197469484, 5.98598602386),
        Complex64::new(-0.0852751354486, 6.29484923772),
    ],
    direct: 3.16372510007e-05,
};

impl Default for HilbertDesign {
    fn default() -> Self {
        ELLIPTIC_12
    }
}

impl HilbertDesign {
    /// Frequency factor for a sample rate: min(limit, 20 kHz / sample_rate)
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `limit` - Upper clamp, keeps the top pole below Nyquist
    pub fn frequency_factor(sample_rate: f64, limit: f64) -> f64 {
        limit.min(DESIGN_BANDWIDTH_HZ / sample_rate)
    }
}
