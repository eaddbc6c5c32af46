//! I/Q byte-stream reading.
//!
//! This module turns a raw byte stream of interleaved little-endian IQ
//! samples into `Complex<f32>` chunks. Reads are allowed to return partial
//! samples; the trailing fragment is carried into the next read so every
//! byte is accounted for exactly once.

use std::io::{ErrorKind, Read};

use num_complex::Complex;

use crate::error::{Error, Result};
use crate::IqFormat;

impl IqFormat {
    /// Size in bytes of one complex sample on the wire.
    pub fn bytes_per_iq(self) -> usize {
        match self {
            IqFormat::Cs16 => 4,
            IqFormat::Cf32 => 8,
        }
    }
}

/// Decode a byte buffer of interleaved IQ samples.
///
/// The buffer length must be a multiple of the format's sample width;
/// anything else is a format error. Values are little-endian, with `cs16`
/// components scaled by 1/32768.
pub fn convert_to_complex(format: IqFormat, bytes: &[u8]) -> Result<Vec<Complex<f32>>> {
    let width = format.bytes_per_iq();
    if bytes.len() % width != 0 {
        return Err(Error::format(format!(
            "unaligned IQ byte stream: {} bytes is not a multiple of {width}",
            bytes.len()
        )));
    }

    let samples = match format {
        IqFormat::Cs16 => bytes
            .chunks_exact(4)
            .map(|c| {
                Complex::new(
                    i16::from_le_bytes([c[0], c[1]]) as f32 / 32768.0,
                    i16::from_le_bytes([c[2], c[3]]) as f32 / 32768.0,
                )
            })
            .collect(),
        IqFormat::Cf32 => bytes
            .chunks_exact(8)
            .map(|c| {
                Complex::new(
                    f32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    f32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                )
            })
            .collect(),
    };
    Ok(samples)
}

/// Chunked I/Q reader with sub-sample carry.
///
/// Each [`read_chunk`](IqReader::read_chunk) pulls up to `chunk_samples`
/// complex samples' worth of bytes from the underlying reader, prepends any
/// carry left over from the previous call, decodes the aligned prefix and
/// keeps the remainder (always shorter than one sample) for the next call.
pub struct IqReader<R: Read> {
    reader: R,
    format: IqFormat,
    chunk_bytes: usize,
    carry: Vec<u8>,
}

impl<R: Read> IqReader<R> {
    pub fn new(reader: R, format: IqFormat, chunk_samples: usize) -> Self {
        Self {
            reader,
            format,
            chunk_bytes: chunk_samples * format.bytes_per_iq(),
            carry: Vec::with_capacity(format.bytes_per_iq()),
        }
    }

    /// Read and decode the next chunk.
    ///
    /// Returns `Ok(None)` on clean end of input. The returned vector may be
    /// empty when a short read plus the carry still holds less than one full
    /// sample. Trailing bytes at EOF that do not form a whole sample are a
    /// format error.
    pub fn read_chunk(&mut self) -> Result<Option<Vec<Complex<f32>>>> {
        let mut chunk = vec![0u8; self.chunk_bytes];
        let bytes_read = loop {
            match self.reader.read(&mut chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if bytes_read == 0 {
            if !self.carry.is_empty() {
                return Err(Error::format(format!(
                    "{} trailing bytes at end of input do not form a whole sample",
                    self.carry.len()
                )));
            }
            return Ok(None);
        }

        let mut all = std::mem::take(&mut self.carry);
        all.extend_from_slice(&chunk[..bytes_read]);

        let usable = all.len() - all.len() % self.format.bytes_per_iq();
        self.carry.extend_from_slice(&all[usable..]);
        all.truncate(usable);

        convert_to_complex(self.format, &all).map(Some)
    }
}
