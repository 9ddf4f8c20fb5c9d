//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! Messages are serialized field by field instead of copying an in-memory
//! struct, so the layout does not depend on compiler padding or host byte
//! order. Multi-byte fields are big-endian.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::channel::{recv_all, send_all};
use crate::error::{MeteoError, Result};
use super::request::truncate_city;
use super::{
    Status, WeatherKind, WeatherRequest, WeatherResponse, CITY_CAPACITY, MAX_CITY_LEN,
    REQUEST_SIZE, RESPONSE_SIZE,
};

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to bytes
///
/// Format: type (1) + city (64, NUL-padded)
pub fn encode_request(request: &WeatherRequest) -> Bytes {
    let city = truncate_city(request.city()).as_bytes();

    let mut buf = BytesMut::with_capacity(REQUEST_SIZE);
    buf.put_u8(request.type_code());
    buf.put_slice(city);
    buf.put_bytes(0, CITY_CAPACITY - city.len());

    buf.freeze()
}

/// Decode a request from exactly REQUEST_SIZE bytes
///
/// The last byte of the city field is always treated as the terminator,
/// whatever the peer put there.
pub fn decode_request(bytes: &[u8]) -> Result<WeatherRequest> {
    if bytes.len() != REQUEST_SIZE {
        return Err(MeteoError::Protocol(format!(
            "Request must be {} bytes, got {}",
            REQUEST_SIZE,
            bytes.len()
        )));
    }

    let type_code = bytes[0];
    let field = &bytes[1..1 + MAX_CITY_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let city = String::from_utf8_lossy(&field[..end]);

    Ok(WeatherRequest::new(type_code, &city))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (4) + type (1) + value (4)
pub fn encode_response(response: &WeatherResponse) -> Bytes {
    let type_code = response.kind.map(|k| k.code()).unwrap_or(0);

    let mut buf = BytesMut::with_capacity(RESPONSE_SIZE);
    buf.put_u32(response.status as u32);
    buf.put_u8(type_code);
    buf.put_f32(response.value);

    buf.freeze()
}

/// Decode a response from exactly RESPONSE_SIZE bytes
pub fn decode_response(bytes: &[u8]) -> Result<WeatherResponse> {
    if bytes.len() != RESPONSE_SIZE {
        return Err(MeteoError::Protocol(format!(
            "Response must be {} bytes, got {}",
            RESPONSE_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    let status_code = buf.get_u32();
    let type_code = buf.get_u8();
    let value = buf.get_f32();

    let status = Status::from_code(status_code).ok_or_else(|| {
        MeteoError::Protocol(format!("Unknown response status: {}", status_code))
    })?;

    let kind = match status {
        Status::Success => Some(WeatherKind::from_code(type_code).ok_or_else(|| {
            MeteoError::Protocol(format!(
                "Success response with unknown type: 0x{:02x}",
                type_code
            ))
        })?),
        _ => None,
    };

    Ok(WeatherResponse { status, kind, value })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until all REQUEST_SIZE bytes arrive or the transfer fails
pub fn read_request<R: Read>(reader: &mut R) -> Result<WeatherRequest> {
    let mut buf = [0u8; REQUEST_SIZE];
    recv_all(reader, &mut buf)?;
    decode_request(&buf)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &WeatherRequest) -> Result<()> {
    let bytes = encode_request(request);
    send_all(writer, &bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<WeatherResponse> {
    let mut buf = [0u8; RESPONSE_SIZE];
    recv_all(reader, &mut buf)?;
    decode_response(&buf)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &WeatherResponse) -> Result<()> {
    let bytes = encode_response(response);
    send_all(writer, &bytes)?;
    writer.flush()?;
    Ok(())
}
