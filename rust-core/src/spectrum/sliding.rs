//! Sliding DFT: one bin of an N-point window, updated per sample
//!
//! X_new[k] = (X_old[k] - x_oldest + x_newest) · e^{j2πk/N}
//!
//! The running value is the unnormalized, unwindowed DFT bin of the last N
//! samples, oldest first. Before N samples have arrived the missing
//! history counts as zeros.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::buffer::try_filled;
use super::goertzel::goertzel;
use crate::error::{DspError, Result};

/// Single-bin tracker over a sliding rectangular window
#[derive(Debug, Clone)]
pub struct SlidingDft {
    /// Window length N
    window: usize,

    /// Tracked bin k
    bin: usize,

    /// Per-sample rotation e^{j2πk/N}
    rotation: Complex64,

    /// Current X[k] of the window
    value: Complex64,

    /// Last N samples; `cursor` points at the oldest
    history: Vec<f64>,

    /// Next write position
    cursor: usize,

    /// Total samples fed since creation or reset
    samples_seen: u64,
}

impl SlidingDft {
    /// Create a tracker for bin `bin` of a `window`-point DFT
    ///
    /// # Errors
    /// `EmptyInput` for a zero window, `BinOutOfRange` if `bin >= window`,
    /// `Allocation` if the history buffer cannot be allocated
    pub fn new(window: usize, bin: usize) -> Result<Self> {
        if window == 0 {
            return Err(DspError::EmptyInput);
        }
        if bin >= window {
            return Err(DspError::BinOutOfRange { bin, len: window });
        }

        let history = try_filled(window, 0.0)?;
        let rotation = Complex64::from_polar(1.0, 2.0 * PI * bin as f64 / window as f64);

        log::debug!("Sliding DFT tracking bin {} of a {}-sample window", bin, window);

        Ok(Self {
            window,
            bin,
            rotation,
            value: Complex64::new(0.0, 0.0),
            history,
            cursor: 0,
            samples_seen: 0,
        })
    }

    /// Feed one sample and return the updated bin
    ///
    /// O(1) per call. Each time the write cursor wraps the value is
    /// recomputed from the stored window, which clears recurrence drift
    /// at an amortized O(1) cost.
    pub fn update(&mut self, sample: f64) -> Complex64 {
        let oldest = self.history[self.cursor];
        self.history[self.cursor] = sample;
        self.cursor += 1;
        self.samples_seen += 1;

        if self.cursor == self.window {
            self.cursor = 0;
            // History is now ordered oldest first
            self.value = self.resync();
        } else {
            self.value = (self.value + (sample - oldest)) * self.rotation;
        }

        self.value
    }

    /// Feed a block of samples, returning the bin after the last one
    pub fn update_block(&mut self, samples: &[f64]) -> Complex64 {
        for &x in samples {
            self.update(x);
        }
        self.value
    }

    fn resync(&self) -> Complex64 {
        // bin < window and history.len() == window, so this cannot fail
        goertzel(&self.history, self.bin).unwrap_or(self.value)
    }

    /// Current bin value
    pub fn value(&self) -> Complex64 {
        self.value
    }

    /// Current bin magnitude
    pub fn magnitude(&self) -> f64 {
        self.value.norm()
    }

    /// True once a full window of real samples has been seen
    pub fn is_primed(&self) -> bool {
        self.samples_seen >= self.window as u64
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn bin(&self) -> usize {
        self.bin
    }

    /// Centre frequency of the tracked bin in Hz
    pub fn bin_frequency_hz(&self, sample_rate: f64) -> f64 {
        self.bin as f64 * sample_rate / self.window as f64
    }

    /// Clear history and value
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.cursor = 0;
        self.samples_seen = 0;
        self.value = Complex64::new(0.0, 0.0);
    }
}
