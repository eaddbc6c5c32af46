//! Datagram framing.
//!
//! Decimator output accumulates here until a full payload is available, at
//! which point one frame is peeled off: a timestamp header sample followed
//! by `payload_samples` consecutive decimated samples. The running output
//! sample counter ties each header to the absolute index of its first
//! payload sample.

use std::collections::VecDeque;

use num_complex::Complex;

use crate::timestamp::TimestampEncoder;

/// Accumulates decimated samples and packetizes them into frames.
pub struct Framer {
    packet_samples: usize,
    payload_samples: usize,
    buffer: VecDeque<Complex<f32>>,
    samples_sent: u64,
}

impl Framer {
    /// `packet_samples` is the total frame length including the header.
    pub fn new(packet_samples: usize) -> Self {
        let payload_samples = packet_samples.saturating_sub(1);
        Self {
            packet_samples,
            payload_samples,
            buffer: VecDeque::with_capacity(payload_samples * 2),
            samples_sent: 0,
        }
    }

    /// Append decimator output to the emission buffer.
    pub fn push(&mut self, samples: &[Complex<f32>]) {
        self.buffer.extend(samples.iter().copied());
    }

    /// Peel off the next frame, if a full payload is buffered.
    ///
    /// The header is encoded for the current sample counter, which then
    /// advances by one payload.
    pub fn next_frame(&mut self, encoder: &mut TimestampEncoder) -> Option<Vec<Complex<f32>>> {
        if self.payload_samples == 0 || self.buffer.len() < self.payload_samples {
            return None;
        }

        let mut frame = Vec::with_capacity(self.packet_samples);
        frame.push(encoder.header_for_sample(self.samples_sent));
        frame.extend(self.buffer.drain(..self.payload_samples));
        self.samples_sent += self.payload_samples as u64;
        Some(frame)
    }

    /// Total payload samples emitted so far.
    pub fn samples_sent(&self) -> u64 {
        self.samples_sent
    }

    /// Samples currently waiting for a full payload.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}
