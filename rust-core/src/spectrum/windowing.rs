//! Window strategy seam
//!
//! Windowing is a preprocessing step applied before a transform; the
//! transform and convolution engines never see which window was used.
//! Shapes are supplied by the caller as a [`Window`] implementation,
//! either a type or a plain closure `Fn(len, index) -> weight`.

/// Window strategy: weight of sample `index` in a window of `len` samples
pub trait Window {
    fn weight(&self, len: usize, index: usize) -> f64;
}

/// Rectangular window (no weighting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangular;

impl Window for Rectangular {
    #[inline]
    fn weight(&self, _len: usize, _index: usize) -> f64 {
        1.0
    }
}

impl<F> Window for F
where
    F: Fn(usize, usize) -> f64,
{
    #[inline]
    fn weight(&self, len: usize, index: usize) -> f64 {
        self(len, index)
    }
}

/// Apply window to signal
///
/// # Returns
/// Windowed copy of `signal`
pub fn apply_window<W: Window + ?Sized>(signal: &[f64], window: &W) -> Vec<f64> {
    let len = signal.len();
    signal
        .iter()
        .enumerate()
        .map(|(i, &s)| s * window.weight(len, i))
        .collect()
}

/// Apply window in-place
pub fn apply_window_inplace<W: Window + ?Sized>(signal: &mut [f64], window: &W) {
    let len = signal.len();
    for (i, s) in signal.iter_mut().enumerate() {
        *s *= window.weight(len, i);
    }
}

/// Amplitude correction factor: N / Σw
///
/// Multiply a windowed magnitude spectrum by this to restore amplitudes.
pub fn window_correction_factor<W: Window + ?Sized>(window: &W, len: usize) -> f64 {
    let sum: f64 = (0..len).map(|i| window.weight(len, i)).sum();
    len as f64 / sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn hann(len: usize, i: usize) -> f64 {
        0.5 * (1.0 - (2.0 * PI * i as f64 / (len - 1) as f64).cos())
    }

    #[test]
    fn test_rectangular_is_identity() {
        let signal = vec![0.5, -1.0, 2.0];
        assert_eq!(apply_window(&signal, &Rectangular), signal);
        assert!((window_correction_factor(&Rectangular, 100) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closure_strategy() {
        let signal = vec![1.0; 101];
        let windowed = apply_window(&signal, &hann);

        assert!(windowed[0].abs() < 1e-12);
        assert!((windowed[50] - 1.0).abs() < 1e-12);
        assert!(windowed[100].abs() < 1e-12);

        // Hann loses about half the amplitude
        let factor = window_correction_factor(&hann, 101);
        assert!(factor > 1.9 && factor < 2.1);
    }

    #[test]
    fn test_dynamic_dispatch() {
        let choices: Vec<Box<dyn Window>> = vec![Box::new(Rectangular), Box::new(hann)];
        let mut signal = vec![2.0; 5];

        apply_window_inplace(&mut signal, choices[1].as_ref());
        assert!((signal[2] - 2.0).abs() < 1e-12);
        assert!(signal[0].abs() < 1e-12);
    }
}
