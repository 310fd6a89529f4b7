//! Direct-form FIR filtering
//!
//! Time-domain convolution, O(N·M). Serves as the reference the block
//! convolvers are measured against and as the cheaper option for very
//! short filters.

use super::check_taps;
use crate::error::Result;
use crate::spectrum::buffer::try_filled;

/// Full linear convolution y = x * h, length `x.len() + h.len() - 1`
///
/// Returns an empty vector if either input is empty.
pub fn convolve_direct(signal: &[f64], taps: &[f64]) -> Vec<f64> {
    if signal.is_empty() || taps.is_empty() {
        return Vec::new();
    }

    let mut output = vec![0.0; signal.len() + taps.len() - 1];
    for (n, &x) in signal.iter().enumerate() {
        for (k, &h) in taps.iter().enumerate() {
            output[n + k] += x * h;
        }
    }
    output
}

/// Streaming FIR filter with a ring-buffer delay line
pub struct FirFilter {
    /// Filter coefficients h[n]
    coefficients: Vec<f64>,

    /// Delay line holding the previous M samples
    state_buffer: Vec<f64>,

    /// Current write position in ring buffer
    cursor: usize,
}

impl FirFilter {
    /// Create a new FIR filter
    ///
    /// # Arguments
    /// * `coefficients` - Filter coefficients h[n] for n = 0..M-1
    pub fn new(coefficients: &[f64]) -> Result<Self> {
        check_taps(coefficients)?;

        let mut taps = try_filled(coefficients.len(), 0.0)?;
        taps.copy_from_slice(coefficients);
        let state_buffer = try_filled(coefficients.len(), 0.0)?;

        Ok(Self {
            coefficients: taps,
            state_buffer,
            cursor: 0,
        })
    }

    /// Process single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let length = self.coefficients.len();
        self.state_buffer[self.cursor] = input;

        // y[n] = Σ h[k]·x[n-k], reading backwards from the cursor
        let mut output = 0.0;
        for (k, &coeff) in self.coefficients.iter().enumerate() {
            let idx = (self.cursor + length - k) % length;
            output += coeff * self.state_buffer[idx];
        }

        self.cursor = (self.cursor + 1) % length;

        output
    }

    /// Process a block of samples
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (clear delay line)
    pub fn reset(&mut self) {
        self.state_buffer.fill(0.0);
        self.cursor = 0;
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn length(&self) -> usize {
        self.coefficients.len()
    }
}
