//! Single-frame framing over a blocking TCP stream.
//!
//! The protocol carries exactly one JSON document per direction and per
//! connection, with no length prefix: each side performs one bounded read
//! of up to [`MAX_FRAME`] bytes and treats whatever arrived as the whole
//! message.
//!
//! # Limitation
//!
//! A message larger than [`MAX_FRAME`] bytes is truncated by the single
//! read and is not reassembled. The truncated bytes then fail JSON
//! decoding on the receiving side. Callers with larger payloads need a
//! different protocol; this one does not grow a length prefix.

use std::io::{self, Read, Write};
use std::net::TcpStream;

/// Upper bound on a single read, and therefore on a whole message.
pub const MAX_FRAME: usize = 4096;

/// Sends one frame: the full byte payload, flushed.
pub fn write_frame(stream: &mut TcpStream, data: &[u8]) -> io::Result<()> {
    stream.write_all(data)?;
    stream.flush()
}

/// Receives one frame with a single bounded read.
///
/// Returns an empty buffer when the peer closed the connection without
/// sending anything; the caller decides what an empty frame means for its
/// side of the protocol.
pub fn read_frame(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; MAX_FRAME];
    let read = stream.read(&mut buf)?;
    buf.truncate(read);
    Ok(buf)
}
