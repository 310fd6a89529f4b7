//! Transform-based cross- and autocorrelation
//!
//! Linear (non-circular) correlation via zero-padding to at least
//! nx + ny - 1 and IFFT(conj(X)·Y).
//!
//! Output layout: length nx + ny - 1, lag 0 at index nx - 1,
//! `r[nx - 1 + m] = Σ x[n]·y[n + m]`.

use super::buffer::{load_real, next_power_of_two, try_filled, ZERO};
use super::radix2::Radix2Fft;
use crate::error::{DspError, Result};

/// Energy below which normalisation is skipped
const MIN_NORM: f64 = 1e-30;

/// Cross-correlation of `x` and `y`
pub fn xcorr(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let (nx, ny) = (x.len(), y.len());
    if nx == 0 || ny == 0 {
        return Err(DspError::EmptyInput);
    }

    let r_len = nx + ny - 1;
    let plan = Radix2Fft::new(next_power_of_two(r_len)?)?;
    let nfft = plan.size();

    let mut bx = try_filled(nfft, ZERO)?;
    let mut by = try_filled(nfft, ZERO)?;
    load_real(x, &mut bx)?;
    load_real(y, &mut by)?;

    plan.forward(&mut bx)?;
    plan.forward(&mut by)?;
    for (a, b) in bx.iter_mut().zip(&by) {
        *a = a.conj() * b;
    }
    plan.inverse(&mut bx)?;

    let mut r = try_filled(r_len, 0.0)?;
    // Non-negative lags wrap from the front of the circular result
    for m in 0..ny {
        r[nx - 1 + m] = bx[m].re;
    }
    // Negative lags wrap from the back
    for m in 1..nx {
        r[nx - 1 - m] = bx[nfft - m].re;
    }

    Ok(r)
}

/// Cross-correlation scaled by sqrt(Ex·Ey), in [-1, 1]
///
/// Left unscaled if either signal has no energy.
pub fn xcorr_normalized(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let mut r = xcorr(x, y)?;

    let ex: f64 = x.iter().map(|v| v * v).sum();
    let ey: f64 = y.iter().map(|v| v * v).sum();
    let norm = (ex * ey).sqrt();
    if norm >= MIN_NORM {
        r.iter_mut().for_each(|v| *v /= norm);
    }

    Ok(r)
}

/// Autocorrelation, length 2n - 1 with lag 0 at index n - 1
pub fn autocorr(x: &[f64]) -> Result<Vec<f64>> {
    xcorr(x, x)
}

/// Autocorrelation normalised so lag 0 is 1.0
pub fn autocorr_normalized(x: &[f64]) -> Result<Vec<f64>> {
    let mut r = autocorr(x)?;

    let r0 = r[x.len() - 1];
    if r0.abs() >= MIN_NORM {
        r.iter_mut().for_each(|v| *v /= r0);
    }

    Ok(r)
}

/// Lag of the largest |r| relative to `centre` (index of lag 0)
///
/// Ties resolve to the earliest index. Returns 0 for an empty slice.
pub fn peak_lag(r: &[f64], centre: usize) -> isize {
    if r.is_empty() {
        return 0;
    }

    let mut best = 0;
    for (i, v) in r.iter().enumerate().skip(1) {
        if v.abs() > r[best].abs() {
            best = i;
        }
    }
    best as isize - centre as isize
}
