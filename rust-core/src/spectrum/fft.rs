//! Real-signal transform layer
//!
//! Loads real samples into a complex buffer, runs the radix-2 engine and
//! derives magnitude, power and dB views.

use num_complex::Complex64;

use super::buffer::{check_transform_len, load_real, magnitudes, try_filled, ZERO};
use super::radix2::{fft, Radix2Fft};
use crate::error::Result;

/// Forward transform of a real signal whose length is a power of two
///
/// # Returns
/// Full complex spectrum, same length as `signal`
pub fn real_transform(signal: &[f64]) -> Result<Vec<Complex64>> {
    check_transform_len(signal.len())?;

    let mut spectrum = try_filled(signal.len(), ZERO)?;
    load_real(signal, &mut spectrum)?;
    fft(&mut spectrum)?;

    Ok(spectrum)
}

/// Transform engine for real-valued signals
///
/// Owns its plan and spectrum buffer so repeated calls do not allocate
/// apart from the returned views.
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Cached radix-2 plan
    plan: Radix2Fft,

    /// Reusable spectrum buffer
    spectrum: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size, must be a power of two
    pub fn new(fft_size: usize) -> Result<Self> {
        let plan = Radix2Fft::new(fft_size)?;
        let spectrum = try_filled(fft_size, ZERO)?;

        Ok(Self {
            fft_size,
            plan,
            spectrum,
        })
    }

    /// Compute the full complex spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal, zero-padded if shorter than `fft_size`
    ///
    /// # Errors
    /// `LengthMismatch` if the signal is longer than `fft_size`
    pub fn compute_spectrum(&mut self, signal: &[f64]) -> Result<&[Complex64]> {
        load_real(signal, &mut self.spectrum)?;
        self.plan.forward(&mut self.spectrum)?;
        Ok(&self.spectrum)
    }

    /// Compute FFT and return magnitude |X[k]| for all `fft_size` bins
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let spectrum = self.compute_spectrum(signal)?;
        Ok(magnitudes(spectrum))
    }

    /// Compute FFT and return magnitude spectrum in dB
    ///
    /// # Arguments
    /// * `signal` - Input signal
    /// * `reference` - Reference value for dB calculation
    ///
    /// # Returns
    /// 20*log10(|X[k]|/reference), floored at the 1e-10 magnitude
    pub fn compute_magnitude_db(&mut self, signal: &[f64], reference: f64) -> Result<Vec<f64>> {
        let magnitude = self.compute_magnitude(signal)?;
        Ok(magnitude
            .iter()
            .map(|&mag| {
                let mag_clamped = mag.max(1e-10); // Avoid log(0)
                20.0 * (mag_clamped / reference).log10()
            })
            .collect())
    }

    /// Compute power spectrum (magnitude squared)
    pub fn compute_power(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let spectrum = self.compute_spectrum(signal)?;
        Ok(spectrum.iter().map(|c| c.norm_sqr()).collect())
    }

    /// Compute power spectrum in dB
    pub fn compute_power_db(&mut self, signal: &[f64], reference: f64) -> Result<Vec<f64>> {
        let power = self.compute_power(signal)?;
        Ok(power
            .iter()
            .map(|&p| {
                let p_clamped = p.max(1e-20);
                10.0 * (p_clamped / (reference * reference)).log10()
            })
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of unique bins for a real input (fft_size/2 + 1)
    pub fn num_unique_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Centre frequency of `bin` in Hz: k·fs/N
    pub fn bin_frequency_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }

    /// Frequency axis in Hz for the unique bins (DC to Nyquist)
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_unique_bins())
            .map(|bin| self.bin_frequency_hz(bin, sample_rate))
            .collect()
    }
}
