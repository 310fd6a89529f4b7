//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::f64::consts::PI;

/// Collects named tolerance checks and reports every failure at once
///
/// Passed explicitly through each scenario instead of global counters.
#[derive(Debug, Default)]
pub struct ToleranceReport {
    checks: usize,
    failures: Vec<String>,
}

impl ToleranceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record |actual - expected| <= tolerance
    pub fn near(&mut self, label: &str, actual: f64, expected: f64, tolerance: f64) {
        self.checks += 1;
        let err = (actual - expected).abs();
        if !(err <= tolerance) {
            self.failures.push(format!(
                "{}: {} vs {} (error {:e} > {:e})",
                label, actual, expected, err, tolerance
            ));
        }
    }

    /// Record a boolean condition
    pub fn holds(&mut self, label: &str, condition: bool) {
        self.checks += 1;
        if !condition {
            self.failures.push(label.to_string());
        }
    }

    /// Largest element-wise error between two slices, recorded as one check
    pub fn max_error(&mut self, label: &str, actual: &[f64], expected: &[f64], tolerance: f64) -> f64 {
        self.checks += 1;
        if actual.len() != expected.len() {
            self.failures
                .push(format!("{}: length {} vs {}", label, actual.len(), expected.len()));
            return f64::INFINITY;
        }

        let max_err = actual
            .iter()
            .zip(expected)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        if !(max_err <= tolerance) {
            self.failures
                .push(format!("{}: max error {:e} > {:e}", label, max_err, tolerance));
        }
        max_err
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Panic listing every failed check
    pub fn assert_all(&self) {
        assert!(
            self.failures.is_empty(),
            "{} of {} checks failed:\n  {}",
            self.failures.len(),
            self.checks,
            self.failures.join("\n  ")
        );
    }
}

pub fn sine(n: usize, amplitude: f64, freq_hz: f64, sample_rate: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

/// Deterministic uniform noise in [-amplitude, amplitude) (64-bit LCG)
pub fn noise(n: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}

/// Hamming-windowed sinc lowpass, `cutoff` normalized to the sample rate (0..0.5)
pub fn lowpass_taps(taps: usize, cutoff: f64) -> Vec<f64> {
    let centre = (taps - 1) as f64 / 2.0;
    (0..taps)
        .map(|i| {
            let n = i as f64 - centre;
            let ideal = if n.abs() < 1e-12 {
                2.0 * cutoff
            } else {
                (2.0 * PI * cutoff * n).sin() / (PI * n)
            };
            let window = 0.54 - 0.46 * (2.0 * PI * i as f64 / (taps - 1) as f64).cos();
            ideal * window
        })
        .collect()
}
