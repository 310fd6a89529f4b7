//! Goertzel single-bin extraction
//!
//! A second-order resonator tuned to one frequency yields the same value as
//! bin k of a full N-point DFT in O(N), for any N (not only powers of two).
//!
//!   coeff = 2·cos(ω),  ω = 2πk/N
//!   s[i]  = x[i] + coeff·s[i-1] - s[i-2]
//!   X[k]  = (s[N-1]·cos(ω) - s[N-2]) + j·s[N-1]·sin(ω)

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{DspError, Result};

/// Run the resonator over `signal`, returning (s[N-1], s[N-2])
#[inline]
fn resonate(signal: &[f64], coeff: f64) -> (f64, f64) {
    let (mut s1, mut s2) = (0.0, 0.0);
    for &x in signal {
        let s0 = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }
    (s1, s2)
}

/// Complex output for angular frequency `omega` (radians/sample)
fn goertzel_at(signal: &[f64], omega: f64) -> Complex64 {
    let (s1, s2) = resonate(signal, 2.0 * omega.cos());
    Complex64::new(s1 * omega.cos() - s2, s1 * omega.sin())
}

fn check_bin(n: usize, bin: usize) -> Result<()> {
    if n == 0 {
        return Err(DspError::EmptyInput);
    }
    if bin >= n {
        return Err(DspError::BinOutOfRange { bin, len: n });
    }
    Ok(())
}

/// DFT bin `bin` of `signal`, equal to `fft(signal)[bin]` for power-of-two lengths
///
/// # Errors
/// `EmptyInput` for an empty signal, `BinOutOfRange` if `bin >= signal.len()`
pub fn goertzel(signal: &[f64], bin: usize) -> Result<Complex64> {
    check_bin(signal.len(), bin)?;
    let omega = 2.0 * PI * bin as f64 / signal.len() as f64;
    Ok(goertzel_at(signal, omega))
}

/// |X[k]|² without the final complex combine: s1² + s2² - coeff·s1·s2
pub fn goertzel_magnitude_sq(signal: &[f64], bin: usize) -> Result<f64> {
    check_bin(signal.len(), bin)?;
    let omega = 2.0 * PI * bin as f64 / signal.len() as f64;
    let coeff = 2.0 * omega.cos();
    let (s1, s2) = resonate(signal, coeff);
    Ok(s1 * s1 + s2 * s2 - coeff * s1 * s2)
}

/// Spectral value at an arbitrary frequency
///
/// Uses the fractional bin `k = freq_hz·N/fs`. Off-bin targets are a
/// best-effort estimate with no fixed error bound.
///
/// # Arguments
/// * `signal` - Input samples
/// * `freq_hz` - Target frequency in Hz
/// * `sample_rate` - Sampling rate in Hz, must be positive and finite
pub fn goertzel_freq(signal: &[f64], freq_hz: f64, sample_rate: f64) -> Result<Complex64> {
    if signal.is_empty() {
        return Err(DspError::EmptyInput);
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(DspError::InvalidParameter(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }
    if !freq_hz.is_finite() {
        return Err(DspError::InvalidParameter(format!(
            "target frequency must be finite, got {}",
            freq_hz
        )));
    }
    if freq_hz.abs() > sample_rate / 2.0 {
        log::warn!(
            "Goertzel target {} Hz is above Nyquist ({} Hz) and will alias",
            freq_hz,
            sample_rate / 2.0
        );
    }

    let n = signal.len() as f64;
    let fractional_bin = freq_hz * n / sample_rate;
    let omega = 2.0 * PI * fractional_bin / n;
    Ok(goertzel_at(signal, omega))
}

/// DTMF row tones (Hz)
pub const DTMF_ROW_FREQS: [f64; 4] = [697.0, 770.0, 852.0, 941.0];

/// DTMF column tones (Hz)
pub const DTMF_COL_FREQS: [f64; 4] = [1209.0, 1336.0, 1477.0, 1633.0];

const DTMF_KEYS: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Detect a DTMF key in one frame (typically 205 samples at 8 kHz)
///
/// Measures power at the eight DTMF tones. A key is reported only when
/// the strongest row and strongest column each exceed twice the mean
/// power of all eight.
///
/// # Returns
/// `Some(key)` or `None` when no valid pair stands out
pub fn detect_dtmf(frame: &[f64], sample_rate: f64) -> Result<Option<char>> {
    let mut row_power = [0.0; 4];
    let mut col_power = [0.0; 4];

    for i in 0..4 {
        row_power[i] = goertzel_freq(frame, DTMF_ROW_FREQS[i], sample_rate)?.norm_sqr();
        col_power[i] = goertzel_freq(frame, DTMF_COL_FREQS[i], sample_rate)?.norm_sqr();
    }

    let strongest = |power: &[f64; 4]| {
        (1..4).fold(0, |best, i| if power[i] > power[best] { i } else { best })
    };
    let best_row = strongest(&row_power);
    let best_col = strongest(&col_power);

    let mean_power = (row_power.iter().sum::<f64>() + col_power.iter().sum::<f64>()) / 8.0;
    if row_power[best_row] < 2.0 * mean_power || col_power[best_col] < 2.0 * mean_power {
        return Ok(None);
    }

    Ok(Some(DTMF_KEYS[best_row][best_col]))
}
