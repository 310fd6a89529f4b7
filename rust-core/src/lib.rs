//! Fourier Stream - radix-2 transform core with single-bin and block convolution engines
//!
//! - [`spectrum`]: in-place radix-2 DFT, real-signal views, Goertzel and sliding DFT
//! - [`filters`]: direct FIR, overlap-add and overlap-save streaming convolution
//!
//! Everything is synchronous and single-threaded. Stateful engines expect
//! one caller feeding blocks or samples in signal order.

pub mod error;
pub mod filters;
pub mod spectrum;

pub use error::{DspError, Result};
pub use filters::{
    build_convolver, BlockConvolver, ConvolutionMethod, FirFilter, OverlapAdd, OverlapSave,
    StreamingConfig,
};
pub use spectrum::{Direction, FftEngine, Radix2Fft, SlidingDft};
