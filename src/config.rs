//! Command-line configuration.
//!
//! Flag parsing is clap's job; semantic validation (positive rates, minimum
//! frame size) happens in the [`Config`] conversion so both paths share the
//! argument-error exit code. The configuration is immutable for the life of
//! the run.

use std::net::Ipv4Addr;
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

use crate::error::{Error, Result};
use crate::IqFormat;

/// Overall sample-rate reduction of the three-stage cascade (8 * 5 * 5).
pub const TOTAL_DECIMATION: usize = 200;

/// Exit code for invalid command-line usage.
pub const EXIT_USAGE: i32 = 64;

/// Decimate an IQ stream from stdin and emit timestamped UDP datagrams
#[derive(Parser, Debug)]
#[command(name = "iqcast")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Incoming complex sample rate in Hz
    #[arg(long, default_value_t = 768_000.0)]
    pub input_rate: f64,

    /// Mix the signal by this amount before decimation, in kHz
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub shift_khz: f64,

    /// Total complex samples per UDP datagram, including the timestamp
    #[arg(long, default_value_t = 1024)]
    pub frame: usize,

    /// Complex samples pulled per stdin read
    #[arg(long, default_value_t = 16384)]
    pub chunk: usize,

    /// Destination IPv4 address
    #[arg(long, default_value = "127.0.0.1")]
    pub ip: Ipv4Addr,

    /// Comma-separated destination UDP ports
    #[arg(long, value_delimiter = ',', default_value = "10000,10001")]
    pub ports: Vec<u16>,

    /// Input sample format: cs16 or cf32
    #[arg(long, default_value = "cf32")]
    pub format: IqFormat,

    /// Verbosity level (-v=info, -vv=debug, -vvv=trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse the command line, exiting on help/version or usage errors.
///
/// Exit codes: 0 for `--help`/`--version`, [`EXIT_USAGE`] for anything clap
/// rejects.
pub fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            process::exit(code);
        }
    }
}

/// Validated pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_rate: f64,
    pub shift_hz: f64,
    pub packet_samples: usize,
    pub chunk_samples: usize,
    pub ip: Ipv4Addr,
    pub ports: Vec<u16>,
    pub format: IqFormat,
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        if !args.input_rate.is_finite() || args.input_rate <= 0.0 {
            return Err(Error::config("input rate must be positive"));
        }
        if args.frame < 2 {
            return Err(Error::config(
                "frame must be at least 2 samples (timestamp + payload)",
            ));
        }
        if args.chunk == 0 {
            return Err(Error::config("chunk size must be positive"));
        }
        if args.ports.is_empty() {
            return Err(Error::config("at least one destination port is required"));
        }

        Ok(Self {
            input_rate: args.input_rate,
            shift_hz: args.shift_khz * 1000.0,
            packet_samples: args.frame,
            chunk_samples: args.chunk,
            ip: args.ip,
            ports: args.ports,
            format: args.format,
        })
    }
}

impl Config {
    /// Sample rate of the decimated output stream.
    pub fn output_rate(&self) -> f64 {
        self.input_rate / TOTAL_DECIMATION as f64
    }

    /// Complex samples per datagram payload, excluding the header.
    pub fn payload_samples(&self) -> usize {
        self.packet_samples - 1
    }
}
