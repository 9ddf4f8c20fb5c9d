//! Client Tests
//!
//! These tests verify:
//! - Parsing of the `"type city"` request argument
//! - Rendering of each response status
//! - Full exchanges against real and scripted servers

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use meteowire::network::{format_city, render, render_report, Client, RequestSpec, Server};
use meteowire::protocol::{encode_response, WeatherKind, WeatherResponse, REQUEST_SIZE};
use meteowire::{ClientConfig, CityRegistry, MeteoError, RandomProvider, ServerConfig, Status};

// =============================================================================
// Helper Functions
// =============================================================================

fn client_for(listener: &TcpListener) -> Client {
    let port = listener.local_addr().unwrap().port();
    Client::new(ClientConfig::builder().server("127.0.0.1").port(port).build())
}

/// Accept one connection, read the request, then hand the stream to `script`
fn scripted_server<F>(script: F) -> (TcpListener, thread::JoinHandle<()>)
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let accept = listener.try_clone().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = accept.accept().unwrap();
        let mut request = [0u8; REQUEST_SIZE];
        stream.read_exact(&mut request).unwrap();
        script(stream);
    });
    (listener, handle)
}

// =============================================================================
// Request Parsing Tests
// =============================================================================

#[test]
fn test_parse_simple_request() {
    let spec = RequestSpec::parse("t Bari").unwrap();
    assert_eq!(spec.type_code, b't');
    assert_eq!(spec.city, "Bari");
}

#[test]
fn test_parse_trims_spaces() {
    let spec = RequestSpec::parse("  W   Torino  ").unwrap();
    assert_eq!(spec.type_code, b'W');
    assert_eq!(spec.city, "Torino");
}

#[test]
fn test_parse_keeps_inner_spaces() {
    let spec = RequestSpec::parse("h Reggio Emilia").unwrap();
    assert_eq!(spec.city, "Reggio Emilia");
}

#[test]
fn test_parse_type_glued_to_city() {
    let spec = RequestSpec::parse("pMilano").unwrap();
    assert_eq!(spec.type_code, b'p');
    assert_eq!(spec.city, "Milano");
}

#[test]
fn test_parse_missing_parts_is_usage_error() {
    for raw in ["", "   ", "t", "t    "] {
        match RequestSpec::parse(raw) {
            Err(e @ MeteoError::Usage(_)) => assert_eq!(e.exit_code(), 1),
            other => panic!("Expected usage error for {:?}, got {:?}", raw, other),
        }
    }
}

#[test]
fn test_spec_truncates_long_city() {
    let raw = format!("t {}", "x".repeat(80));
    let request = RequestSpec::parse(&raw).unwrap().to_request();
    assert_eq!(request.city().len(), 63);
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_format_city() {
    assert_eq!(format_city("bARI"), "Bari");
    assert_eq!(format_city("reggio EMILIA"), "Reggio emilia");
    assert_eq!(format_city("x"), "X");
    assert_eq!(format_city(""), "");
}

#[test]
fn test_render_each_kind() {
    let cases = [
        (WeatherKind::Temperature, 21.34, "Bari: Temperature = 21.3°C"),
        (WeatherKind::Humidity, 64.96, "Bari: Humidity = 65.0%"),
        (WeatherKind::Wind, 7.0, "Bari: Wind = 7.0 km/h"),
        (WeatherKind::Pressure, 1013.3, "Bari: Pressure = 1013.3 hPa"),
    ];

    for (kind, value, expected) in cases {
        assert_eq!(render(&WeatherResponse::success(kind, value), "BARI"), expected);
    }
}

#[test]
fn test_render_errors() {
    assert_eq!(
        render(&WeatherResponse::city_not_available(), "Atlantide"),
        "City not available"
    );
    assert_eq!(
        render(&WeatherResponse::invalid_request(), "Bari"),
        "Invalid request"
    );
}

#[test]
fn test_render_report_prefix() {
    let line = render_report("127.0.0.1", &WeatherResponse::invalid_request(), "Bari");
    assert_eq!(line, "Received result from server ip 127.0.0.1. Invalid request");
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_query_real_server() {
    let config = ServerConfig::builder().port(0).build();
    let server = Server::bind(
        config,
        Arc::new(CityRegistry::default()),
        Arc::new(RandomProvider::new()),
    )
    .unwrap();
    let port = server.local_addr().unwrap().port();
    let serving = thread::spawn(move || server.serve_one());

    let client = Client::new(ClientConfig::builder().port(port).build());
    let spec = RequestSpec::parse("W   Torino  ").unwrap();
    let response = client.query(&spec.to_request()).unwrap();

    assert_eq!(response.status, Status::Success);
    assert_eq!(response.kind, Some(WeatherKind::Wind));
    assert!((0.0..=100.0).contains(&response.value));
    serving.join().unwrap().unwrap();
}

#[test]
fn test_query_fragmented_response() {
    let (listener, server) = scripted_server(|mut stream| {
        let bytes = encode_response(&WeatherResponse::success(WeatherKind::Humidity, 42.0));
        stream.set_nodelay(true).unwrap();
        for piece in bytes.chunks(2) {
            stream.write_all(piece).unwrap();
            stream.flush().unwrap();
            thread::sleep(Duration::from_millis(5));
        }
    });

    let response = client_for(&listener)
        .query(&RequestSpec::parse("h Bari").unwrap().to_request())
        .unwrap();

    assert_eq!(response, WeatherResponse::success(WeatherKind::Humidity, 42.0));
    server.join().unwrap();
}

#[test]
fn test_query_server_closes_early() {
    let (listener, server) = scripted_server(|mut stream| {
        stream.write_all(&[0, 0, 0]).unwrap();
    });

    let result = client_for(&listener).query(&RequestSpec::parse("t Bari").unwrap().to_request());

    match result {
        Err(MeteoError::ShortTransfer {
            transferred,
            expected,
        }) => {
            assert_eq!(transferred, 3);
            assert_eq!(expected, 9);
        }
        other => panic!("Expected short transfer, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn test_connect_failure_is_setup_error() {
    // Grab a free port, then release it so nothing listens there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = Client::new(ClientConfig::builder().port(port).build());
    match client.query(&RequestSpec::parse("t Bari").unwrap().to_request()) {
        Err(e @ MeteoError::Setup { .. }) => assert_eq!(e.exit_code(), -1),
        other => panic!("Expected setup error, got {:?}", other),
    }
}
