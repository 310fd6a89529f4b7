//! Complex buffer helpers shared by every transform consumer
//!
//! Sizing (power-of-two padding), fallible allocation and real/complex
//! loading. All engines allocate through [`try_filled`] so that an
//! allocation failure surfaces as [`DspError::Allocation`] instead of an abort.

use num_complex::Complex64;

use crate::error::{DspError, Result};

/// Complex zero, used for padding
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Check that `n` is a usable transform length (non-zero power of two)
pub fn check_transform_len(n: usize) -> Result<()> {
    if n == 0 {
        return Err(DspError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(DspError::NotPowerOfTwo(n));
    }
    Ok(())
}

/// Smallest power of two >= `n`
///
/// # Errors
/// `EmptyInput` for `n == 0`, `InvalidParameter` if the result would overflow `usize`.
pub fn next_power_of_two(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(DspError::EmptyInput);
    }
    n.checked_next_power_of_two()
        .ok_or_else(|| DspError::InvalidParameter(format!("{} has no power-of-two size", n)))
}

/// Allocate a vector of `len` copies of `value`, reporting allocation failure
pub fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| DspError::Allocation(len))?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Copy a real signal into a complex buffer (imaginary parts zero),
/// zero-padding the remainder
///
/// # Errors
/// `LengthMismatch` if the signal is longer than the buffer.
pub fn load_real(signal: &[f64], buffer: &mut [Complex64]) -> Result<()> {
    if signal.len() > buffer.len() {
        return Err(DspError::LengthMismatch {
            expected: buffer.len(),
            actual: signal.len(),
        });
    }

    let (head, rest) = buffer.split_at_mut(signal.len());
    for (slot, &x) in head.iter_mut().zip(signal) {
        *slot = Complex64::new(x, 0.0);
    }
    rest.fill(ZERO);

    Ok(())
}

/// Per-bin magnitude |X[k]| = sqrt(re² + im²)
pub fn magnitudes(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Element-wise product `target[k] *= response[k]` (circular convolution in time)
pub(crate) fn multiply_in_place(target: &mut [Complex64], response: &[Complex64]) {
    for (x, &h) in target.iter_mut().zip(response) {
        *x *= h;
    }
}
