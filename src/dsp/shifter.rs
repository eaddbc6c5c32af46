//! Complex frequency shift.
//!
//! Multiplies the sample stream by a complex exponential to translate
//! spectral content. The phase accumulator is kept in f64 and persists
//! across calls, so the oscillator stays continuous over arbitrarily long
//! runs regardless of chunk size.

use std::f64::consts::{PI, TAU};

use num_complex::Complex;

/// A frequency shifter with a continuous phase accumulator.
///
/// A positive `shift_hz` moves spectral content upward (multiplication by
/// `exp(+j*phi)`); a negative shift moves it downward. A zero shift leaves
/// the samples untouched, bit for bit.
pub struct FrequencyShifter {
    shift_hz: f64,
    step: f64,
    phase: f64,
}

impl FrequencyShifter {
    /// Create a shifter for the given sample rate and shift.
    pub fn new(sample_rate: f64, shift_hz: f64) -> Self {
        let sample_rate = if sample_rate > 0.0 { sample_rate } else { 1.0 };
        let step = if shift_hz == 0.0 {
            0.0
        } else {
            TAU * shift_hz / sample_rate
        };
        Self {
            shift_hz,
            step,
            phase: 0.0,
        }
    }

    /// Mix the samples in place, advancing the oscillator one step per
    /// sample. The phase is folded into (-pi, pi] after each update.
    pub fn mix(&mut self, samples: &mut [Complex<f32>]) {
        if self.shift_hz == 0.0 {
            return;
        }
        for sample in samples.iter_mut() {
            let (sin, cos) = self.phase.sin_cos();
            *sample *= Complex::new(cos as f32, sin as f32);
            self.phase += self.step;
            if self.phase > PI {
                self.phase -= TAU;
            } else if self.phase < -PI {
                self.phase += TAU;
            }
        }
    }
}
