//! Overlap-save block convolution
//!
//! Keeps a rolling segment of N = nextpow2(L + M - 1) samples:
//!
//!   [ last M-1 samples | L new samples | zero padding ]
//!
//! The segment is transformed, multiplied by the cached filter spectrum and
//! inverse transformed. The first M-1 result samples are wrapped-around
//! (circular) terms and are discarded; the next L are the output.
//!
//! The history starts silent, so the first block is the convolution of the
//! stream against an all-zero past. Callers that need real pre-history
//! should treat the first M-1 outputs as warm-up.

use num_complex::Complex64;

use super::{check_block, filter_spectrum, BlockConvolver};
use crate::error::Result;
use crate::spectrum::buffer::{load_real, multiply_in_place, try_filled, ZERO};
use crate::spectrum::Radix2Fft;

/// Overlap-save streaming FIR convolver
pub struct OverlapSave {
    /// Filter coefficients in frequency domain
    filter_spectrum: Vec<Complex64>,

    /// Transform plan of size `fft_size`
    plan: Radix2Fft,

    /// Per-block scratch
    scratch: Vec<Complex64>,

    /// Rolling input segment, length `fft_size`
    segment: Vec<f64>,

    fft_size: usize,
    block_size: usize,
    filter_length: usize,
}

impl OverlapSave {
    /// Create a new overlap-save convolver
    ///
    /// # Arguments
    /// * `coefficients` - Filter taps h[n], length M
    /// * `block_size` - Samples consumed and produced per call, L
    pub fn new(coefficients: &[f64], block_size: usize) -> Result<Self> {
        let (plan, filter_spectrum) = filter_spectrum(coefficients, block_size)?;
        let fft_size = plan.size();

        let scratch = try_filled(fft_size, ZERO)?;
        let segment = try_filled(fft_size, 0.0)?;

        if coefficients.len() > block_size {
            log::warn!(
                "Overlap-save with {} taps and block size {}: most of each transform is history",
                coefficients.len(),
                block_size
            );
        }
        log::debug!(
            "Overlap-save: {} taps, block {}, FFT size {}",
            coefficients.len(),
            block_size,
            fft_size
        );

        Ok(Self {
            filter_spectrum,
            plan,
            scratch,
            segment,
            fft_size,
            block_size,
            filter_length: coefficients.len(),
        })
    }

    /// Number of leading result samples discarded per block (M - 1)
    pub fn discard_len(&self) -> usize {
        self.filter_length - 1
    }

    /// Filter one block of exactly `block_size` samples into `output`
    pub fn process(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        check_block(self.block_size, input, output)?;

        let keep = self.discard_len();
        let l = self.block_size;
        let filled = keep + l;

        // Retain the last M-1 samples of the previous segment, then append
        self.segment.copy_within(l..filled, 0);
        self.segment[keep..filled].copy_from_slice(input);
        self.segment[filled..].fill(0.0);

        load_real(&self.segment, &mut self.scratch)?;
        self.plan.forward(&mut self.scratch)?;
        multiply_in_place(&mut self.scratch, &self.filter_spectrum);
        self.plan.inverse(&mut self.scratch)?;

        for (out, y) in output.iter_mut().zip(&self.scratch[keep..filled]) {
            *out = y.re;
        }

        Ok(())
    }

    /// Filter one block, returning a new output vector
    pub fn process_block(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let mut output = vec![0.0; self.block_size];
        self.process(input, &mut output)?;
        Ok(output)
    }

    /// Reset to silent history
    pub fn reset(&mut self) {
        self.segment.fill(0.0);
    }

    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}

impl BlockConvolver for OverlapSave {
    fn process(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        OverlapSave::process(self, input, output)
    }

    fn reset(&mut self) {
        OverlapSave::reset(self)
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn filter_length(&self) -> usize {
        self.filter_length
    }
}
