//! Transform core and single-bin spectral extraction

pub mod buffer;
pub mod radix2;
pub mod fft;
pub mod goertzel;
pub mod sliding;
pub mod correlation;
pub mod windowing;

pub use buffer::{load_real, magnitudes, next_power_of_two};
pub use radix2::{fft, ifft, transform, Direction, Radix2Fft};
pub use fft::{real_transform, FftEngine};
pub use goertzel::{detect_dtmf, goertzel, goertzel_freq, goertzel_magnitude_sq};
pub use sliding::SlidingDft;
pub use windowing::{apply_window, Rectangular, Window};
