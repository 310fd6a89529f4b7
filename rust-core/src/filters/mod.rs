//! FIR filtering: direct form and block (overlap-add / overlap-save) convolution

pub mod fir;
pub mod overlap_add;
pub mod overlap_save;

pub use fir::{convolve_direct, FirFilter};
pub use overlap_add::OverlapAdd;
pub use overlap_save::OverlapSave;

use num_complex::Complex64;

use crate::error::{DspError, Result};
use crate::spectrum::buffer::{load_real, multiply_in_place, next_power_of_two, try_filled, ZERO};
use crate::spectrum::Radix2Fft;

/// Block convolution engine fed fixed-size blocks in stream order
///
/// Blocks must arrive in the order they occur in the signal; there is no
/// sequence numbering, so skipped or reordered blocks corrupt the output.
pub trait BlockConvolver {
    /// Filter exactly `block_size()` samples into an equally long `output`
    fn process(&mut self, input: &[f64], output: &mut [f64]) -> Result<()>;

    /// Forget all cross-block state
    fn reset(&mut self);

    fn block_size(&self) -> usize;

    fn filter_length(&self) -> usize;
}

/// Block convolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolutionMethod {
    /// Sum the carried tail into the next block
    OverlapAdd,
    /// Carry input history and discard the wrapped prefix
    OverlapSave,
}

/// Streaming convolver configuration
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Samples per call (L)
    pub block_size: usize,

    /// Engine to build
    pub method: ConvolutionMethod,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            block_size: 1024,
            method: ConvolutionMethod::OverlapAdd,
        }
    }
}

/// Build the configured convolver for `taps`
pub fn build_convolver(
    taps: &[f64],
    config: &StreamingConfig,
) -> Result<Box<dyn BlockConvolver + Send>> {
    Ok(match config.method {
        ConvolutionMethod::OverlapAdd => Box::new(OverlapAdd::new(taps, config.block_size)?),
        ConvolutionMethod::OverlapSave => Box::new(OverlapSave::new(taps, config.block_size)?),
    })
}

/// Run a whole signal through `convolver`, block by block
///
/// The final partial block is zero-padded; the output is truncated back to
/// `signal.len()`.
pub fn process_stream<C: BlockConvolver + ?Sized>(
    convolver: &mut C,
    signal: &[f64],
) -> Result<Vec<f64>> {
    let block_size = convolver.block_size();
    let mut output = try_filled(signal.len(), 0.0)?;
    let mut padded = vec![0.0; block_size];
    let mut block_out = vec![0.0; block_size];

    for (input, out) in signal.chunks(block_size).zip(output.chunks_mut(block_size)) {
        if input.len() == block_size {
            convolver.process(input, out)?;
        } else {
            padded[..input.len()].copy_from_slice(input);
            padded[input.len()..].fill(0.0);
            convolver.process(&padded, &mut block_out)?;
            out.copy_from_slice(&block_out[..out.len()]);
        }
    }

    Ok(output)
}

/// One-shot linear convolution through the transform, length `x.len() + h.len() - 1`
pub fn fft_convolve(signal: &[f64], taps: &[f64]) -> Result<Vec<f64>> {
    if signal.is_empty() || taps.is_empty() {
        return Err(DspError::EmptyInput);
    }

    let out_len = signal.len() + taps.len() - 1;
    let plan = Radix2Fft::new(next_power_of_two(out_len)?)?;

    let mut x = try_filled(plan.size(), ZERO)?;
    let mut h = try_filled(plan.size(), ZERO)?;
    load_real(signal, &mut x)?;
    load_real(taps, &mut h)?;

    plan.forward(&mut x)?;
    plan.forward(&mut h)?;
    multiply_in_place(&mut x, &h);
    plan.inverse(&mut x)?;

    Ok(x[..out_len].iter().map(|c| c.re).collect())
}

pub(crate) fn check_taps(coefficients: &[f64]) -> Result<()> {
    if coefficients.is_empty() {
        return Err(DspError::EmptyInput);
    }
    Ok(())
}

pub(crate) fn check_block(block_size: usize, input: &[f64], output: &[f64]) -> Result<()> {
    for len in [input.len(), output.len()] {
        if len != block_size {
            return Err(DspError::LengthMismatch {
                expected: block_size,
                actual: len,
            });
        }
    }
    Ok(())
}

/// Plan of size nextpow2(L + M - 1) and the transform of the zero-padded taps
pub(crate) fn filter_spectrum(
    coefficients: &[f64],
    block_size: usize,
) -> Result<(Radix2Fft, Vec<Complex64>)> {
    check_taps(coefficients)?;
    if block_size == 0 {
        return Err(DspError::EmptyInput);
    }

    let min_fft_size = block_size
        .checked_add(coefficients.len() - 1)
        .ok_or_else(|| DspError::InvalidParameter("block size too large".to_string()))?;
    let plan = Radix2Fft::new(next_power_of_two(min_fft_size)?)?;

    let mut spectrum = try_filled(plan.size(), ZERO)?;
    load_real(coefficients, &mut spectrum)?;
    plan.forward(&mut spectrum)?;

    Ok((plan, spectrum))
}
