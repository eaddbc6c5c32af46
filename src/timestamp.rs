//! Sample-indexed wall-clock timestamps.
//!
//! The encoder anchors to the wall clock on first use and maps every output
//! sample index to an absolute instant by adding `index / sample_rate`
//! seconds. The resulting `(seconds, nanoseconds)` pair is packed into one
//! complex sample whose component bit patterns are the two u32 values;
//! downstream consumers reinterpret them as integers.

use std::time::{SystemTime, UNIX_EPOCH};

use num_complex::Complex;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Encodes output sample indices as wall-clock header samples.
///
/// The anchor is captured once, on the first call to
/// [`header_for_sample`](TimestampEncoder::header_for_sample), and stays
/// fixed for the run so consecutive headers advance purely with the sample
/// index.
pub struct TimestampEncoder {
    sample_rate: f64,
    anchor: Option<(u32, u32)>,
}

impl TimestampEncoder {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            anchor: None,
        }
    }

    /// Drop the anchor; the next call re-anchors to the current wall clock.
    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Header sample for the given output sample index.
    ///
    /// The real part carries the u32 seconds-since-epoch bit pattern, the
    /// imaginary part the u32 nanoseconds bit pattern, with nanoseconds
    /// always below 10^9.
    pub fn header_for_sample(&mut self, index: u64) -> Complex<f32> {
        let (base_sec, base_nsec) = *self.anchor.get_or_insert_with(anchor_to_wall_clock);

        // Integer rates take an exact u128 path so day-long runs never lose
        // sub-nanosecond alignment; fractional rates fall back to f64.
        let offset_ns: u128 = if self.sample_rate > 0.0 && self.sample_rate.fract() == 0.0 {
            index as u128 * NANOS_PER_SEC / self.sample_rate as u128
        } else if self.sample_rate > 0.0 {
            (index as f64 / self.sample_rate * 1e9).round() as u128
        } else {
            0
        };

        let total_ns = u128::from(base_sec) * NANOS_PER_SEC + u128::from(base_nsec) + offset_ns;
        let sec = (total_ns / NANOS_PER_SEC) as u32;
        let nsec = (total_ns % NANOS_PER_SEC) as u32;

        Complex::new(f32::from_bits(sec), f32::from_bits(nsec))
    }
}

fn anchor_to_wall_clock() -> (u32, u32) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32, now.subsec_nanos())
}

/// Decode a header sample back into `(seconds, nanoseconds)`.
pub fn decode_header(header: Complex<f32>) -> (u32, u32) {
    (header.re.to_bits(), header.im.to_bits())
}
