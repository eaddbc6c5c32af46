#![doc = include_str!("../readme.md")]

use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod dsp;
pub mod error;
pub mod framer;
pub mod iqread;
pub mod pipeline;
pub mod timestamp;
pub mod udp;

pub use error::{Error, Result};

/**
 * Input I/Q Sample Format
 */
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IqFormat {
    /// Complex signed 16-bit, little-endian, scaled by 1/32768 (Cs16)
    Cs16,
    /// Complex 32-bit float, little-endian (Cf32)
    Cf32,
}

impl FromStr for IqFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cs16" => Ok(IqFormat::Cs16),
            "cf32" => Ok(IqFormat::Cf32),
            other => Err(Error::format(format!(
                "unknown IQ format '{other}' (expected cs16 or cf32)"
            ))),
        }
    }
}

impl fmt::Display for IqFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IqFormat::Cs16 => write!(f, "cs16"),
            IqFormat::Cf32 => write!(f, "cf32"),
        }
    }
}
