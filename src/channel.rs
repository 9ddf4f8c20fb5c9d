//! Request Channel
//!
//! Moves a fixed-size buffer across a connected stream. A single `read` or
//! `write` may transfer only part of the buffer, so both directions loop
//! until the whole length has moved. An orderly close or an error before
//! that point is a failure, never a short success.

use std::io::{ErrorKind, Read, Write};

use crate::error::{MeteoError, Result};

/// Write every byte of `buf` to `writer`
pub fn send_all<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let mut sent = 0;

    while sent < buf.len() {
        match writer.write(&buf[sent..]) {
            Ok(0) => {
                return Err(MeteoError::ShortTransfer {
                    transferred: sent,
                    expected: buf.len(),
                })
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(MeteoError::Io(e)),
        }
    }

    Ok(())
}

/// Fill all of `buf` from `reader`
pub fn recv_all<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut received = 0;

    while received < buf.len() {
        match reader.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(MeteoError::ShortTransfer {
                    transferred: received,
                    expected: buf.len(),
                })
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(MeteoError::Io(e)),
        }
    }

    Ok(())
}
