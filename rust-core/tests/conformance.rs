//! End-to-end behaviour of the transform core and the engines built on it

mod common;

use common::{lowpass_taps, noise, sine, ToleranceReport};
use fourier_stream::filters::{convolve_direct, process_stream};
use fourier_stream::spectrum::{fft, goertzel, ifft, real_transform};
use fourier_stream::{
    build_convolver, ConvolutionMethod, OverlapAdd, OverlapSave, SlidingDft, StreamingConfig,
};
use num_complex::Complex64;

fn two_tone_with_noise(n: usize) -> Vec<f64> {
    let low = sine(n, 1.0, 300.0, 8000.0);
    let high = sine(n, 0.5, 3000.0, 8000.0);
    let hiss = noise(n, 0.1, 42);
    (0..n).map(|i| low[i] + high[i] + hiss[i]).collect()
}

#[test]
fn eight_point_impulse_is_flat() {
    let mut report = ToleranceReport::new();

    let mut buffer = vec![Complex64::new(0.0, 0.0); 8];
    buffer[0] = Complex64::new(1.0, 0.0);
    fft(&mut buffer).unwrap();

    for (k, x) in buffer.iter().enumerate() {
        report.near(&format!("|X[{}]|", k), x.norm(), 1.0, 1e-12);
    }
    report.assert_all();
}

#[test]
fn eight_point_constant_concentrates_in_dc() {
    let mut report = ToleranceReport::new();

    let spectrum = real_transform(&[1.0; 8]).unwrap();

    report.near("X[0].re", spectrum[0].re, 8.0, 1e-12);
    report.near("X[0].im", spectrum[0].im, 0.0, 1e-12);
    for (k, x) in spectrum.iter().enumerate().skip(1) {
        report.near(&format!("|X[{}]|", k), x.norm(), 0.0, 1e-12);
    }
    report.assert_all();
}

#[test]
fn roundtrip_recovers_input() {
    let mut report = ToleranceReport::new();

    for &n in &[2usize, 16, 256, 1024] {
        let original: Vec<Complex64> = noise(n, 1.0, n as u64)
            .into_iter()
            .zip(noise(n, 1.0, 7 * n as u64))
            .map(|(re, im)| Complex64::new(re, im))
            .collect();

        let mut buffer = original.clone();
        fft(&mut buffer).unwrap();
        ifft(&mut buffer).unwrap();

        let max_err = buffer
            .iter()
            .zip(&original)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max);
        report.near(&format!("roundtrip N={}", n), max_err, 0.0, 1e-12);
    }
    report.assert_all();
}

#[test]
fn goertzel_matches_transform_bin_for_1khz_tone() {
    let mut report = ToleranceReport::new();

    let n = 1024;
    let signal = sine(n, 1.0, 1000.0, 8000.0);
    let spectrum = real_transform(&signal).unwrap();
    let g = goertzel(&signal, 128).unwrap();

    let rel_err = (g - spectrum[128]).norm() / spectrum[128].norm();
    report.near("relative error at bin 128", rel_err, 0.0, 1e-10);
    report.near("|X[128]|", g.norm(), 512.0, 1e-8);
    report.assert_all();
}

#[test]
fn overlap_add_256_point_lowpass_matches_direct_fir() {
    let mut report = ToleranceReport::new();

    let taps = lowpass_taps(31, 0.25);
    let signal = two_tone_with_noise(2048);

    let mut ola = OverlapAdd::new(&taps, 128).unwrap();
    report.holds("FFT size is 256", ola.fft_size() == 256);

    let filtered = process_stream(&mut ola, &signal).unwrap();
    let reference = convolve_direct(&signal, &taps);

    report.max_error("overlap-add vs direct", &filtered, &reference[..signal.len()], 1e-10);
    report.assert_all();
}

#[test]
fn overlap_save_matches_direct_after_first_block() {
    let mut report = ToleranceReport::new();

    let taps = lowpass_taps(31, 0.25);
    let signal = two_tone_with_noise(1024);
    let block = 256;

    let mut ols = OverlapSave::new(&taps, block).unwrap();
    let filtered = process_stream(&mut ols, &signal).unwrap();
    let reference = convolve_direct(&signal, &taps);

    report.max_error(
        "overlap-save vs direct (past warm-up)",
        &filtered[block..],
        &reference[block..signal.len()],
        1e-10,
    );
    report.assert_all();
}

#[test]
fn both_strategies_agree_for_any_block_size() {
    let mut report = ToleranceReport::new();

    let taps = lowpass_taps(17, 0.1);
    let signal = two_tone_with_noise(1000);

    for &block_size in &[1usize, 7, 16, 100, 512] {
        let outputs: Vec<Vec<f64>> = [ConvolutionMethod::OverlapAdd, ConvolutionMethod::OverlapSave]
            .iter()
            .map(|&method| {
                let config = StreamingConfig { block_size, method };
                let mut convolver = build_convolver(&taps, &config).unwrap();
                process_stream(convolver.as_mut(), &signal).unwrap()
            })
            .collect();

        report.max_error(
            &format!("add vs save, block {}", block_size),
            &outputs[0][block_size..],
            &outputs[1][block_size..],
            1e-10,
        );
    }
    report.assert_all();
}

#[test]
fn sliding_dft_converges_to_half_window_amplitude() {
    let mut report = ToleranceReport::new();

    let window = 256;
    let bin = 20;
    let fs = 8000.0;
    let amplitude = 0.6;

    let mut tracker = SlidingDft::new(window, bin).unwrap();
    let signal = sine(4 * window, amplitude, tracker.bin_frequency_hz(fs), fs);

    for (i, &x) in signal.iter().enumerate() {
        let value = tracker.update(x);
        if i + 1 >= window {
            report.near(
                &format!("|X[{}]| after {} samples", bin, i + 1),
                value.norm(),
                amplitude * window as f64 / 2.0,
                1e-9,
            );
        }
    }
    report.holds("tracker primed", tracker.is_primed());
    report.assert_all();
}
