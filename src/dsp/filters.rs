//! Low-pass FIR design.
//!
//! Windowed-sinc design with a Hamming window, used by the decimator stages
//! for anti-aliasing. The cutoff is expressed as a fraction of the sample
//! rate (Nyquist = 0.5).

use std::f32::consts::PI;

/// Design a Hamming-windowed sinc low-pass filter.
///
/// The returned impulse response always has odd length (an even request is
/// rounded up) and at least 3 taps, and is normalized to unity gain at DC.
///
/// # Arguments
/// * `taps` - Requested number of taps
/// * `cutoff` - Normalized cutoff frequency as a fraction of the sample rate,
///   in (0.0, 0.5)
///
/// # Example
/// ```
/// use iqcast::dsp::filters::low_pass;
///
/// let coeffs = low_pass(128, 0.45 / 8.0);
/// assert_eq!(coeffs.len() % 2, 1);
/// let sum: f32 = coeffs.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-3);
/// ```
pub fn low_pass(taps: usize, cutoff: f32) -> Vec<f32> {
    let taps = taps.max(3);
    // Odd length keeps the response symmetric about a center tap.
    let taps = taps | 1;

    let mut coeffs = Vec::with_capacity(taps);
    let last = (taps - 1) as f32;
    let mid = last / 2.0;

    for n in 0..taps {
        let m = n as f32 - mid;
        let sinc = if m.abs() < 1e-6 {
            2.0 * cutoff
        } else {
            (2.0 * PI * cutoff * m).sin() / (PI * m)
        };
        let window = 0.54 - 0.46 * (2.0 * PI * n as f32 / last).cos();
        coeffs.push(window * sinc);
    }

    let sum: f32 = coeffs.iter().sum();
    if sum != 0.0 {
        for c in coeffs.iter_mut() {
            *c /= sum;
        }
    }
    coeffs
}
