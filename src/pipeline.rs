//! Top-level streaming loop.
//!
//! Reads byte chunks from the input, decodes them, mixes, runs the
//! three-stage decimator cascade, and drains full frames to the UDP
//! emitter. Every stage keeps its own state across iterations, so the
//! emitted stream is independent of how the input happens to be chunked.

use std::io::Read;

use tracing::trace;

use crate::config::Config;
use crate::dsp::decimator::FirDecimator;
use crate::dsp::shifter::FrequencyShifter;
use crate::dsp::DspBlock;
use crate::error::Result;
use crate::framer::Framer;
use crate::iqread::IqReader;
use crate::timestamp::TimestampEncoder;
use crate::udp::UdpStreamer;

/// `(factor, taps, cutoff)` for the three cascade stages. The 0.45
/// numerator keeps the transition band safely below the post-decimation
/// Nyquist fraction of 0.5.
pub const STAGES: [(usize, usize, f32); 3] = [
    (8, 128, 0.45 / 8.0),
    (5, 80, 0.45 / 5.0),
    (5, 80, 0.45 / 5.0),
];

/// Build the decimator cascade with the standard stage parameters.
pub fn decimator_cascade() -> [FirDecimator; 3] {
    STAGES.map(|(factor, taps, cutoff)| FirDecimator::new(factor, taps, cutoff))
}

/// Run the pipeline until the input is exhausted.
///
/// Returns the total number of payload samples emitted. Buffered samples
/// short of a full payload at EOF are discarded; trailing bytes short of a
/// full sample are an error.
pub fn run<R: Read>(config: &Config, input: R, streamer: &mut UdpStreamer) -> Result<u64> {
    let mut reader = IqReader::new(input, config.format, config.chunk_samples);
    let mut shifter = FrequencyShifter::new(config.input_rate, config.shift_hz);
    let [mut stage1, mut stage2, mut stage3] = decimator_cascade();
    let mut encoder = TimestampEncoder::new(config.output_rate());
    let mut framer = Framer::new(config.packet_samples);

    while let Some(mut samples) = reader.read_chunk()? {
        if samples.is_empty() {
            continue;
        }

        shifter.mix(&mut samples);
        let after_stage1 = stage1.process(&samples);
        let after_stage2 = stage2.process(&after_stage1);
        let decimated = stage3.process(&after_stage2);
        trace!(
            input = samples.len(),
            output = decimated.len(),
            "processed chunk"
        );

        framer.push(&decimated);
        while let Some(frame) = framer.next_frame(&mut encoder) {
            streamer.send(&frame);
        }
    }

    Ok(framer.samples_sent())
}
