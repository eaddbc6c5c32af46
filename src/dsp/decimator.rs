//! Decimating FIR filter.
//!
//! Each stage low-pass filters and downsamples by an integer factor in a
//! single pass. State is a fixed-length ring buffer of past samples plus a
//! phase counter, so the output is identical no matter how the input stream
//! is chunked.

use num_complex::Complex;

use super::filters::low_pass;
use super::DspBlock;

/// A decimator that reduces the sample rate by an integer factor.
///
/// The anti-aliasing filter is a Hamming-windowed sinc designed by
/// [`low_pass`]. One output sample is produced for every `factor` input
/// samples; the phase counter persists across calls so chunk boundaries do
/// not disturb the decimation grid.
pub struct FirDecimator {
    factor: usize,
    taps: Vec<f32>,
    state: Vec<Complex<f32>>,
    write_index: usize,
    phase: usize,
}

impl FirDecimator {
    /// Create a decimator with the given factor and filter parameters.
    ///
    /// A zero `factor` yields a degenerate stage whose `process` returns no
    /// output; validating the factor is the caller's concern.
    ///
    /// # Example
    /// ```
    /// use iqcast::dsp::decimator::FirDecimator;
    /// use iqcast::dsp::DspBlock;
    /// use num_complex::Complex;
    ///
    /// let mut stage = FirDecimator::new(8, 128, 0.45 / 8.0);
    /// let input = vec![Complex::new(1.0f32, 0.0); 1024];
    /// let output = stage.process(&input);
    /// assert_eq!(output.len(), 128);
    /// ```
    pub fn new(factor: usize, taps: usize, cutoff: f32) -> Self {
        let taps = low_pass(taps, cutoff);
        let state = vec![Complex::new(0.0, 0.0); taps.len()];
        Self {
            factor,
            taps,
            state,
            write_index: 0,
            phase: 0,
        }
    }

    /// The decimation factor.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// The number of FIR filter taps.
    pub fn taps(&self) -> usize {
        self.taps.len()
    }

    /// Clear the filter state and decimation phase.
    pub fn reset(&mut self) {
        self.state.fill(Complex::new(0.0, 0.0));
        self.write_index = 0;
        self.phase = 0;
    }
}

impl DspBlock for FirDecimator {
    /// Filter and decimate a block of samples.
    ///
    /// Output length for an input of length `n` is `n / factor` within one
    /// sample, with the exact count determined by the persistent phase.
    fn process(&mut self, data: &[Complex<f32>]) -> Vec<Complex<f32>> {
        if self.factor == 0 || self.taps.is_empty() {
            return Vec::new();
        }

        let mut output = Vec::with_capacity(data.len() / self.factor + 1);
        for &sample in data {
            self.state[self.write_index] = sample;
            self.write_index = (self.write_index + 1) % self.state.len();
            self.phase = (self.phase + 1) % self.factor;
            if self.phase == 0 {
                // Inner product over the most recent samples, newest first.
                let mut acc = Complex::new(0.0f32, 0.0);
                let mut idx = self.write_index;
                for &tap in &self.taps {
                    idx = if idx == 0 { self.state.len() - 1 } else { idx - 1 };
                    acc += self.state[idx] * tap;
                }
                output.push(acc);
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decimator_new() {
        let stage = FirDecimator::new(8, 129, 0.45 / 8.0);
        assert_eq!(stage.factor(), 8);
        assert_eq!(stage.taps(), 129);
    }

    #[test]
    fn test_decimator_output_count() {
        let mut stage = FirDecimator::new(4, 17, 0.1);
        let input = vec![Complex::new(1.0f32, 0.0); 20];
        let output = stage.process(&input);
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn test_decimator_output_count_across_chunks() {
        // 10 + 10 samples at factor 4 must still give 5 outputs in total.
        let mut stage = FirDecimator::new(4, 17, 0.1);
        let chunk = vec![Complex::new(1.0f32, 0.0); 10];
        let total = stage.process(&chunk).len() + stage.process(&chunk).len();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_decimator_zero_factor_is_silent() {
        let mut stage = FirDecimator::new(0, 17, 0.1);
        let input = vec![Complex::new(1.0f32, 0.0); 64];
        assert!(stage.process(&input).is_empty());
    }

    #[test]
    fn test_decimator_chunk_invariance() {
        let input: Vec<Complex<f32>> = (0..1000)
            .map(|n| {
                let t = n as f32 * 0.01;
                Complex::new(t.sin(), (t * 0.7).cos())
            })
            .collect();

        let mut whole = FirDecimator::new(5, 81, 0.45 / 5.0);
        let expected = whole.process(&input);

        // Uneven split points, including splits inside a decimation period.
        let mut chunked = FirDecimator::new(5, 81, 0.45 / 5.0);
        let mut actual = Vec::new();
        for piece in [&input[..1], &input[1..8], &input[8..500], &input[500..]] {
            actual.extend(chunked.process(piece));
        }

        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(a.re, e.re, epsilon = 1e-6);
            assert_relative_eq!(a.im, e.im, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_decimator_dc_gain() {
        let mut stage = FirDecimator::new(4, 65, 0.45 / 4.0);
        let input = vec![Complex::new(1.0f32, 0.0); 4096];
        let output = stage.process(&input);

        // Skip the start-up transient while the state buffer fills.
        for sample in output.iter().skip(20) {
            assert_relative_eq!(sample.re, 1.0, epsilon = 1e-2);
            assert_relative_eq!(sample.im, 0.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_decimator_reset() {
        let mut stage = FirDecimator::new(4, 17, 0.1);
        let input = vec![Complex::new(1.0f32, 0.0); 18];
        let first = stage.process(&input);
        stage.reset();
        let second = stage.process(&input);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }
}
