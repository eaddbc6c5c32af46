//! iqcast — decimate an IQ stream from stdin into timestamped UDP datagrams.
//!
//! ```bash
//! sdr_capture | iqcast --input-rate 768000 --shift-khz 10 --ports 10000,10001
//! ```
//!
//! Exit codes: 0 on end of input, 1 on a fatal runtime error, 64 on invalid
//! arguments.

use std::io;
use std::process;

use tracing::{error, info};

use iqcast::config::{self, Config};
use iqcast::pipeline;
use iqcast::udp::UdpStreamer;

fn main() {
    // One-shot process setup: a vanished datagram consumer must not take
    // the pipeline down with SIGPIPE.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }

    let args = config::parse_args();

    // 0 = WARN (quiet), 1 = INFO, 2 = DEBUG, 3+ = TRACE
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .try_init();

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Run with --help for usage.");
            process::exit(config::EXIT_USAGE);
        }
    };

    let mut streamer = match UdpStreamer::new(config.ip, &config.ports) {
        Ok(streamer) => streamer,
        Err(err) => {
            error!("UDP output setup failed: {err}");
            process::exit(1);
        }
    };

    info!(
        input_rate = config.input_rate,
        output_rate = config.output_rate(),
        shift_hz = config.shift_hz,
        frame = config.packet_samples,
        chunk = config.chunk_samples,
        format = %config.format,
        destinations = ?streamer.destinations(),
        "starting decimation pipeline"
    );

    let stdin = io::stdin();
    match pipeline::run(&config, stdin.lock(), &mut streamer) {
        Ok(samples_sent) => {
            info!(
                samples_sent,
                datagrams = streamer.datagrams_sent(),
                send_errors = streamer.send_errors(),
                "input drained, shutting down"
            );
        }
        Err(err) => {
            error!("fatal error: {err}");
            process::exit(1);
        }
    }
}
