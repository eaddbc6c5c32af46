//! Test helper utilities for generating synthetic I/Q signals

use std::f64::consts::TAU;

use num_complex::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generate a complex exponential at a specific frequency.
pub fn tone(freq_hz: f64, sample_rate: f64, num_samples: usize) -> Vec<Complex<f32>> {
    let step = TAU * freq_hz / sample_rate;
    (0..num_samples)
        .map(|n| {
            let phase = step * n as f64;
            Complex::new(phase.cos() as f32, phase.sin() as f32)
        })
        .collect()
}

/// Serialize complex samples as interleaved little-endian f32 bytes (cf32).
pub fn to_cf32_bytes(samples: &[Complex<f32>]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(samples.len() * 8);
    for sample in samples {
        buffer.extend_from_slice(&sample.re.to_le_bytes());
        buffer.extend_from_slice(&sample.im.to_le_bytes());
    }
    buffer
}

/// Serialize complex samples as interleaved little-endian i16 bytes (cs16),
/// scaled to full range.
pub fn to_cs16_bytes(samples: &[Complex<f32>]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(samples.len() * 4);
    for sample in samples {
        let i = (sample.re * 32767.0) as i16;
        let q = (sample.im * 32767.0) as i16;
        buffer.extend_from_slice(&i.to_le_bytes());
        buffer.extend_from_slice(&q.to_le_bytes());
    }
    buffer
}

/// A periodic tone burst embedded in silence, the shape of a telemetry
/// beacon: `pulse_width_s` bursts at `tone_offset_hz`, repeating every
/// `pulse_interval_s` starting at `first_pulse_s`.
pub struct PulseTrain {
    pub sample_rate: f64,
    pub tone_offset_hz: f64,
    pub duration_s: f64,
    pub pulse_width_s: f64,
    pub pulse_interval_s: f64,
    pub first_pulse_s: f64,
    pub amplitude: f32,
}

impl PulseTrain {
    pub fn generate(&self) -> Vec<Complex<f32>> {
        let num_samples = (self.duration_s * self.sample_rate) as usize;
        let step = TAU * self.tone_offset_hz / self.sample_rate;

        (0..num_samples)
            .map(|n| {
                let t = n as f64 / self.sample_rate;
                let mut pulse_start = self.first_pulse_s;
                let mut in_pulse = false;
                while pulse_start < self.duration_s {
                    if t >= pulse_start && t < pulse_start + self.pulse_width_s {
                        in_pulse = true;
                        break;
                    }
                    pulse_start += self.pulse_interval_s;
                }

                if in_pulse {
                    let phase = step * n as f64;
                    Complex::new(
                        self.amplitude * phase.cos() as f32,
                        self.amplitude * phase.sin() as f32,
                    )
                } else {
                    Complex::new(0.0, 0.0)
                }
            })
            .collect()
    }
}

/// Add white Gaussian noise to both components, deterministically seeded.
pub fn add_awgn(samples: &mut [Complex<f32>], std_dev: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0f32, std_dev).expect("valid std dev");
    for sample in samples.iter_mut() {
        sample.re += noise.sample(&mut rng);
        sample.im += noise.sample(&mut rng);
    }
}

/// Estimate the frequency of a complex tone from its average per-sample
/// phase step.
pub fn estimate_tone_hz(samples: &[Complex<f32>], sample_rate: f64) -> f64 {
    let mut sum = Complex::new(0.0f64, 0.0);
    for pair in samples.windows(2) {
        let prev = Complex::new(pair[0].re as f64, pair[0].im as f64);
        let next = Complex::new(pair[1].re as f64, pair[1].im as f64);
        sum += next * prev.conj();
    }
    sum.im.atan2(sum.re) * sample_rate / TAU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_and_start() {
        let samples = tone(1000.0, 96_000.0, 100);
        assert_eq!(samples.len(), 100);
        assert!((samples[0].re - 1.0).abs() < 1e-6);
        assert!(samples[0].im.abs() < 1e-6);
    }

    #[test]
    fn test_tone_estimator_recovers_frequency() {
        let samples = tone(5_000.0, 96_000.0, 4096);
        assert!((estimate_tone_hz(&samples, 96_000.0) - 5_000.0).abs() < 10.0);
    }

    #[test]
    fn test_cf32_bytes_length() {
        let bytes = to_cf32_bytes(&tone(1000.0, 96_000.0, 100));
        assert_eq!(bytes.len(), 800);
    }

    #[test]
    fn test_cs16_bytes_length() {
        let bytes = to_cs16_bytes(&tone(1000.0, 96_000.0, 100));
        assert_eq!(bytes.len(), 400);
    }

    #[test]
    fn test_pulse_train_silence_between_pulses() {
        let train = PulseTrain {
            sample_rate: 1000.0,
            tone_offset_hz: 100.0,
            duration_s: 1.0,
            pulse_width_s: 0.1,
            pulse_interval_s: 0.5,
            first_pulse_s: 0.1,
            amplitude: 0.7,
        };
        let samples = train.generate();
        assert_eq!(samples.len(), 1000);
        // before the first pulse
        assert_eq!(samples[50], Complex::new(0.0, 0.0));
        // inside the first pulse
        assert!(samples[150].norm() > 0.5);
        // between pulses
        assert_eq!(samples[300], Complex::new(0.0, 0.0));
        // inside the second pulse
        assert!(samples[650].norm() > 0.5);
    }

    #[test]
    fn test_awgn_is_deterministic() {
        let mut first = vec![Complex::new(0.0f32, 0.0); 32];
        let mut second = vec![Complex::new(0.0f32, 0.0); 32];
        add_awgn(&mut first, 0.12, 42);
        add_awgn(&mut second, 0.12, 42);
        assert_eq!(first, second);
        assert!(first.iter().any(|s| s.norm() > 0.0));
    }
}
