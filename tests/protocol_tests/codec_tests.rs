//! Codec Tests
//!
//! Tests for request and response encoding/decoding.

use std::io::Cursor;

use meteowire::protocol::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, Status, WeatherKind, WeatherRequest,
    WeatherResponse, CITY_CAPACITY, MAX_CITY_LEN, REQUEST_SIZE, RESPONSE_SIZE,
};
use meteowire::MeteoError;

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_message_sizes() {
    assert_eq!(CITY_CAPACITY, 64);
    assert_eq!(REQUEST_SIZE, 65);
    assert_eq!(RESPONSE_SIZE, 9);
}

#[test]
fn test_request_layout() {
    let encoded = encode_request(&WeatherRequest::new(b't', "Bari"));

    assert_eq!(encoded.len(), REQUEST_SIZE);
    assert_eq!(encoded[0], b't');
    assert_eq!(&encoded[1..5], b"Bari");
    assert!(encoded[5..].iter().all(|&b| b == 0));
}

#[test]
fn test_request_keeps_raw_type_byte() {
    let encoded = encode_request(&WeatherRequest::new(b'X', "Roma"));
    assert_eq!(encoded[0], b'X');
}

#[test]
fn test_success_response_layout() {
    let encoded = encode_response(&WeatherResponse::success(WeatherKind::Temperature, 21.5));

    assert_eq!(encoded.len(), RESPONSE_SIZE);
    assert_eq!(&encoded[0..4], &[0, 0, 0, 0]);
    assert_eq!(encoded[4], b't');
    assert_eq!(&encoded[5..9], &21.5f32.to_be_bytes());
}

#[test]
fn test_error_response_layout() {
    let invalid = encode_response(&WeatherResponse::invalid_request());
    assert_eq!(&invalid[..], &[0, 0, 0, 2, 0, 0, 0, 0, 0]);

    let missing = encode_response(&WeatherResponse::city_not_available());
    assert_eq!(&missing[..], &[0, 0, 0, 1, 0, 0, 0, 0, 0]);
}

// =============================================================================
// City Truncation Tests
// =============================================================================

#[test]
fn test_long_city_is_truncated_not_rejected() {
    let long = "a".repeat(100);
    let request = WeatherRequest::new(b'h', &long);
    assert_eq!(request.city().len(), MAX_CITY_LEN);

    let encoded = encode_request(&request);
    assert_eq!(encoded.len(), REQUEST_SIZE);
    assert_eq!(encoded[REQUEST_SIZE - 1], 0);

    let decoded = decode_request(&encoded).unwrap();
    assert_eq!(decoded.city(), &long[..MAX_CITY_LEN]);
}

#[test]
fn test_truncation_respects_char_boundaries() {
    // 2-byte chars: 63 bytes would split the 32nd one
    let city = "à".repeat(40);
    let request = WeatherRequest::new(b't', &city);

    assert_eq!(request.city().len(), 62);
    assert_eq!(request.city().chars().count(), 31);
}

#[test]
fn test_city_at_capacity_is_kept() {
    let city = "b".repeat(MAX_CITY_LEN);
    let request = WeatherRequest::new(b't', &city);
    assert_eq!(request.city(), city);
}

// =============================================================================
// Request Decoding Tests
// =============================================================================

#[test]
fn test_decode_request() {
    let decoded = decode_request(&encode_request(&WeatherRequest::new(b'P', "Milano"))).unwrap();

    assert_eq!(decoded.type_code(), b'P');
    assert_eq!(decoded.kind(), Some(WeatherKind::Pressure));
    assert_eq!(decoded.city(), "Milano");
}

#[test]
fn test_decode_request_forces_terminator() {
    // Peer filled the whole city field without a NUL
    let mut bytes = vec![b'w'];
    bytes.extend(std::iter::repeat(b'z').take(CITY_CAPACITY));

    let decoded = decode_request(&bytes).unwrap();
    assert_eq!(decoded.city().len(), MAX_CITY_LEN);
}

#[test]
fn test_decode_request_stops_at_first_nul() {
    let mut bytes = vec![0u8; REQUEST_SIZE];
    bytes[0] = b't';
    bytes[1..5].copy_from_slice(b"roma");
    bytes[6..10].copy_from_slice(b"junk");

    let decoded = decode_request(&bytes).unwrap();
    assert_eq!(decoded.city(), "roma");
}

#[test]
fn test_decode_request_wrong_size() {
    let result = decode_request(&[b't'; 30]);
    assert!(matches!(result, Err(MeteoError::Protocol(_))));

    let result = decode_request(&[b't'; REQUEST_SIZE + 1]);
    assert!(matches!(result, Err(MeteoError::Protocol(_))));
}

#[test]
fn test_unknown_type_decodes_without_kind() {
    let decoded = decode_request(&encode_request(&WeatherRequest::new(b'x', "Bari"))).unwrap();
    assert_eq!(decoded.type_code(), b'x');
    assert_eq!(decoded.kind(), None);
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_success_response() {
    let bytes = encode_response(&WeatherResponse::success(WeatherKind::Pressure, 1013.25));
    let decoded = decode_response(&bytes).unwrap();

    assert_eq!(decoded.status, Status::Success);
    assert_eq!(decoded.kind, Some(WeatherKind::Pressure));
    assert_eq!(decoded.value, 1013.25);
}

#[test]
fn test_decode_error_response_ignores_type() {
    let bytes = [0, 0, 0, 1, b't', 0, 0, 0, 0];
    let decoded = decode_response(&bytes).unwrap();

    assert_eq!(decoded.status, Status::CityNotAvailable);
    assert_eq!(decoded.kind, None);
    assert_eq!(decoded.value, 0.0);
}

#[test]
fn test_decode_unknown_status() {
    let bytes = [0, 0, 0, 7, 0, 0, 0, 0, 0];
    match decode_response(&bytes) {
        Err(MeteoError::Protocol(msg)) => assert!(msg.contains("Unknown response status")),
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_decode_success_without_type() {
    let bytes = [0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert!(matches!(decode_response(&bytes), Err(MeteoError::Protocol(_))));
}

#[test]
fn test_decode_response_wrong_size() {
    assert!(matches!(
        decode_response(&[0u8; 8]),
        Err(MeteoError::Protocol(_))
    ));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_request_roundtrip() {
    let mut buf = Vec::new();
    write_request(&mut buf, &WeatherRequest::new(b'h', "Napoli")).unwrap();
    assert_eq!(buf.len(), REQUEST_SIZE);

    let request = read_request(&mut Cursor::new(buf)).unwrap();
    assert_eq!(request.type_code(), b'h');
    assert_eq!(request.city(), "Napoli");
}

#[test]
fn test_stream_response_roundtrip() {
    let mut buf = Vec::new();
    write_response(&mut buf, &WeatherResponse::success(WeatherKind::Wind, 12.0)).unwrap();
    assert_eq!(buf.len(), RESPONSE_SIZE);

    let response = read_response(&mut Cursor::new(buf)).unwrap();
    assert_eq!(response, WeatherResponse::success(WeatherKind::Wind, 12.0));
}

#[test]
fn test_read_request_short_stream() {
    let encoded = encode_request(&WeatherRequest::new(b't', "Bari"));
    let mut cursor = Cursor::new(encoded[..30].to_vec());

    match read_request(&mut cursor) {
        Err(MeteoError::ShortTransfer {
            transferred,
            expected,
        }) => {
            assert_eq!(transferred, 30);
            assert_eq!(expected, REQUEST_SIZE);
        }
        other => panic!("Expected short transfer, got {:?}", other),
    }
}

#[test]
fn test_read_response_empty_stream() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(matches!(
        read_response(&mut cursor),
        Err(MeteoError::ShortTransfer { transferred: 0, expected: RESPONSE_SIZE })
    ));
}
