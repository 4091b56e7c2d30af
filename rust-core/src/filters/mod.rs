//! IIR Hilbert filter bank and its frozen designs

pub mod design;
pub mod hilbert;

pub use design::{HilbertDesign, ELLIPTIC_12, HILBERT_ORDER};
pub use hilbert::{HilbertConfig, HilbertIir};
