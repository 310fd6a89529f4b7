//! Overlap-add block convolution
//!
//! Each block of L new samples is zero-padded to N = nextpow2(L + M - 1),
//! multiplied by the cached filter spectrum and inverse transformed. The
//! first L result samples plus the carried tail are emitted; the rest of
//! the result becomes the tail for the following blocks.
//!
//!   block i:   [x_i, 0 … 0] → FFT → ×H → IFFT → y_i[0..N]
//!   output_i = y_i[0..L] + tail[0..L]
//!   tail     = y_i[L..N] + tail[L..]

use num_complex::Complex64;

use super::{check_block, filter_spectrum, BlockConvolver};
use crate::error::Result;
use crate::spectrum::buffer::{load_real, multiply_in_place, try_filled, ZERO};
use crate::spectrum::Radix2Fft;

/// Overlap-add streaming FIR convolver
///
/// Block size and filter are fixed at construction; the tail length
/// always matches them.
pub struct OverlapAdd {
    /// Filter coefficients in frequency domain
    filter_spectrum: Vec<Complex64>,

    /// Transform plan of size `fft_size`
    plan: Radix2Fft,

    /// Per-block scratch
    scratch: Vec<Complex64>,

    /// Unconsumed convolution remainder, length `fft_size - block_size`
    tail: Vec<f64>,

    fft_size: usize,
    block_size: usize,
    filter_length: usize,
}

impl OverlapAdd {
    /// Create a new overlap-add convolver
    ///
    /// # Arguments
    /// * `coefficients` - Filter taps h[n], length M
    /// * `block_size` - Samples consumed and produced per call, L
    ///
    /// # Errors
    /// `EmptyInput` for no taps or zero block size, `Allocation` on
    /// allocation failure
    pub fn new(coefficients: &[f64], block_size: usize) -> Result<Self> {
        let (plan, filter_spectrum) = filter_spectrum(coefficients, block_size)?;
        let fft_size = plan.size();

        let scratch = try_filled(fft_size, ZERO)?;
        let tail = try_filled(fft_size - block_size, 0.0)?;

        log::debug!(
            "Overlap-add: {} taps, block {}, FFT size {}",
            coefficients.len(),
            block_size,
            fft_size
        );

        Ok(Self {
            filter_spectrum,
            plan,
            scratch,
            tail,
            fft_size,
            block_size,
            filter_length: coefficients.len(),
        })
    }

    /// Filter one block of exactly `block_size` samples into `output`
    pub fn process(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        check_block(self.block_size, input, output)?;

        let l = self.block_size;
        let tail_len = self.tail.len();

        load_real(input, &mut self.scratch)?;
        self.plan.forward(&mut self.scratch)?;
        multiply_in_place(&mut self.scratch, &self.filter_spectrum);
        self.plan.inverse(&mut self.scratch)?;

        for (i, out) in output.iter_mut().enumerate() {
            let carry = if i < tail_len { self.tail[i] } else { 0.0 };
            *out = self.scratch[i].re + carry;
        }

        // Shift the old tail down by L while adding the new remainder
        for i in 0..tail_len {
            let carry = if i + l < tail_len { self.tail[i + l] } else { 0.0 };
            self.tail[i] = self.scratch[l + i].re + carry;
        }

        Ok(())
    }

    /// Filter one block, returning a new output vector
    pub fn process_block(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let mut output = vec![0.0; self.block_size];
        self.process(input, &mut output)?;
        Ok(output)
    }

    /// Drain the pending convolution tail (M - 1 samples) and clear it
    ///
    /// Appending this after the last block completes the full linear
    /// convolution of the stream.
    pub fn flush(&mut self) -> Vec<f64> {
        let pending = (self.filter_length - 1).min(self.tail.len());
        let drained = self.tail[..pending].to_vec();
        self.tail.fill(0.0);
        drained
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.tail.fill(0.0);
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

impl BlockConvolver for OverlapAdd {
    fn process(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        OverlapAdd::process(self, input, output)
    }

    fn reset(&mut self) {
        OverlapAdd::reset(self)
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn filter_length(&self) -> usize {
        self.filter_length
    }
}
