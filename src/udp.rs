//! UDP emission.
//!
//! One unconnected socket fans each frame out to a fixed set of destination
//! endpoints. Sends are blocking; a failed or short send is counted and
//! logged but never stops the pipeline.

use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use num_complex::Complex;
use tracing::warn;

use crate::error::{Error, Result};

/// Fan-out UDP sender for complex sample frames.
pub struct UdpStreamer {
    socket: UdpSocket,
    destinations: Vec<SocketAddrV4>,
    datagrams_sent: u64,
    send_errors: u64,
}

impl UdpStreamer {
    /// Bind a socket and resolve the destination list.
    ///
    /// Zero ports are silently dropped; a list with no usable port left is
    /// an error.
    pub fn new(ip: Ipv4Addr, ports: &[u16]) -> Result<Self> {
        let destinations: Vec<SocketAddrV4> = ports
            .iter()
            .filter(|&&port| port != 0)
            .map(|&port| SocketAddrV4::new(ip, port))
            .collect();
        if destinations.is_empty() {
            return Err(Error::net("no usable destination ports configured"));
        }

        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        Ok(Self {
            socket,
            destinations,
            datagrams_sent: 0,
            send_errors: 0,
        })
    }

    /// Send one frame to every destination.
    ///
    /// Each complex sample is serialized as two little-endian f32 values.
    pub fn send(&mut self, frame: &[Complex<f32>]) {
        let payload = frame_bytes(frame);
        for dest in &self.destinations {
            match self.socket.send_to(&payload, dest) {
                Ok(sent) if sent == payload.len() => self.datagrams_sent += 1,
                Ok(sent) => {
                    self.send_errors += 1;
                    warn!(%dest, sent, expected = payload.len(), "short UDP send");
                }
                Err(err) => {
                    self.send_errors += 1;
                    warn!(%dest, %err, "UDP send failed");
                }
            }
        }
    }

    pub fn destinations(&self) -> &[SocketAddrV4] {
        &self.destinations
    }

    pub fn datagrams_sent(&self) -> u64 {
        self.datagrams_sent
    }

    pub fn send_errors(&self) -> u64 {
        self.send_errors
    }
}

/// Serialize a frame as interleaved little-endian f32 component pairs.
pub fn frame_bytes(frame: &[Complex<f32>]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame.len() * 8);
    for sample in frame {
        bytes.extend_from_slice(&sample.re.to_le_bytes());
        bytes.extend_from_slice(&sample.im.to_le_bytes());
    }
    bytes
}
