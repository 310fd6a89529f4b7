//! In-place radix-2 decimation-in-time transform
//!
//! Bit-reversal permutation followed by log2(N) butterfly stages.
//! Forward is unnormalized, inverse divides by N so that
//! `inverse(forward(x)) == x` up to rounding.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::buffer::{check_transform_len, try_filled};
use crate::error::{DspError, Result};

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// X[k] = Σ x[n]·e^{-j2πkn/N}
    Forward,
    /// x[n] = (1/N)·Σ X[k]·e^{+j2πkn/N}
    Inverse,
}

impl Direction {
    /// Sign of the twiddle exponent
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }
}

/// Reorder samples so that index i holds the sample at bit-reverse(i)
fn bit_reverse_permute(buffer: &mut [Complex64]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    if bits == 0 {
        return;
    }

    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buffer.swap(i, j);
        }
    }
}

fn normalize(buffer: &mut [Complex64]) {
    let scale = 1.0 / buffer.len() as f64;
    for x in buffer.iter_mut() {
        *x *= scale;
    }
}

/// Transform `buffer` in place
///
/// Twiddles are produced by a per-stage recurrence `w ← w·W_size`, so no
/// table is allocated. Use [`Radix2Fft`] when the same size is transformed
/// repeatedly.
///
/// # Errors
/// `EmptyInput` or `NotPowerOfTwo`; the buffer is left untouched.
pub fn transform(buffer: &mut [Complex64], direction: Direction) -> Result<()> {
    let n = buffer.len();
    check_transform_len(n)?;

    bit_reverse_permute(buffer);

    let sign = direction.sign();
    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = Complex64::from_polar(1.0, sign * 2.0 * PI / size as f64);

        for start in (0..n).step_by(size) {
            let mut w = Complex64::new(1.0, 0.0);
            for j in start..start + half {
                let u = buffer[j];
                let t = w * buffer[j + half];
                buffer[j] = u + t;
                buffer[j + half] = u - t;
                w *= step;
            }
        }

        size <<= 1;
    }

    if direction == Direction::Inverse {
        normalize(buffer);
    }

    Ok(())
}

/// Forward transform shorthand
pub fn fft(buffer: &mut [Complex64]) -> Result<()> {
    transform(buffer, Direction::Forward)
}

/// Inverse transform shorthand (normalized by 1/N)
pub fn ifft(buffer: &mut [Complex64]) -> Result<()> {
    transform(buffer, Direction::Inverse)
}

/// Radix-2 transform plan for one fixed size
///
/// Caches the forward twiddles `W_N^k = e^{-j2πk/N}` for `k < N/2`; the
/// inverse uses their conjugates. Stage of length `size` reads every
/// `N/size`-th entry.
#[derive(Debug, Clone)]
pub struct Radix2Fft {
    size: usize,
    twiddles: Vec<Complex64>,
}

impl Radix2Fft {
    /// Plan a transform of length `size`
    pub fn new(size: usize) -> Result<Self> {
        check_transform_len(size)?;

        let mut twiddles = try_filled(size / 2, Complex64::new(1.0, 0.0))?;
        for (k, w) in twiddles.iter_mut().enumerate() {
            *w = Complex64::from_polar(1.0, -2.0 * PI * k as f64 / size as f64);
        }

        log::debug!("Planned radix-2 transform of size {}", size);

        Ok(Self { size, twiddles })
    }

    /// Transform length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `buffer` in place; `buffer.len()` must equal [`Self::size`]
    pub fn process(&self, buffer: &mut [Complex64], direction: Direction) -> Result<()> {
        if buffer.len() != self.size {
            return Err(DspError::LengthMismatch {
                expected: self.size,
                actual: buffer.len(),
            });
        }

        let n = self.size;
        bit_reverse_permute(buffer);

        let inverse = direction == Direction::Inverse;
        let mut size = 2;
        while size <= n {
            let half = size / 2;
            let stride = n / size;

            for start in (0..n).step_by(size) {
                for j in 0..half {
                    let w = self.twiddles[j * stride];
                    let w = if inverse { w.conj() } else { w };

                    let u = buffer[start + j];
                    let t = w * buffer[start + j + half];
                    buffer[start + j] = u + t;
                    buffer[start + j + half] = u - t;
                }
            }

            size <<= 1;
        }

        if inverse {
            normalize(buffer);
        }

        Ok(())
    }

    pub fn forward(&self, buffer: &mut [Complex64]) -> Result<()> {
        self.process(buffer, Direction::Forward)
    }

    pub fn inverse(&self, buffer: &mut [Complex64]) -> Result<()> {
        self.process(buffer, Direction::Inverse)
    }
}
