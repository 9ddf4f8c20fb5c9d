//! TCP Client
//!
//! One query per run: connect, send one request, read one response, close.

use std::net::{Shutdown, TcpStream};

use crate::config::ClientConfig;
use crate::error::{MeteoError, Result};
use crate::protocol::{read_response, write_request, Status, WeatherRequest, WeatherResponse};

/// Blocking weather client
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a connection to the configured server
    pub fn connect(&self) -> Result<TcpStream> {
        let stream = TcpStream::connect((self.config.server.as_str(), self.config.port))
            .map_err(|e| MeteoError::setup("connect", e))?;

        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.config.read_timeout())?;
        stream.set_write_timeout(self.config.write_timeout())?;
        Ok(stream)
    }

    /// Run a full exchange for `request`
    ///
    /// Any transfer failure aborts the exchange; nothing is retried.
    pub fn query(&self, request: &WeatherRequest) -> Result<WeatherResponse> {
        let mut stream = self.connect()?;
        tracing::debug!(
            "Connected to {}:{}, sending request for {:?}",
            self.config.server,
            self.config.port,
            request.city()
        );

        write_request(&mut stream, request)?;
        let response = read_response(&mut stream)?;

        let _ = stream.shutdown(Shutdown::Both);
        Ok(response)
    }
}

/// A `"<type> <city>"` query as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// First byte of the first non-space character
    pub type_code: u8,

    /// Everything after the type, with surrounding spaces removed
    pub city: String,
}

impl RequestSpec {
    /// Parse the raw `-r` argument
    ///
    /// The type is the first non-space character, the city is the trimmed
    /// remainder. A missing type or city is a usage error.
    pub fn parse(raw: &str) -> Result<Self> {
        let rest = raw.trim_start_matches(' ');

        let mut chars = rest.chars();
        let type_char = chars
            .next()
            .ok_or_else(|| MeteoError::Usage("request is missing a type".to_string()))?;

        let city = chars.as_str().trim_matches(' ');
        if city.is_empty() {
            return Err(MeteoError::Usage("request is missing a city".to_string()));
        }

        let mut utf8 = [0u8; 4];
        let type_code = type_char.encode_utf8(&mut utf8).as_bytes()[0];

        Ok(Self {
            type_code,
            city: city.to_string(),
        })
    }

    /// Wire request for this query, city truncated to fit
    pub fn to_request(&self) -> WeatherRequest {
        WeatherRequest::new(self.type_code, &self.city)
    }
}

/// Capitalize the first character and lowercase the rest
pub fn format_city(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Human-readable result line for a response
pub fn render(response: &WeatherResponse, city: &str) -> String {
    match (response.status, response.kind) {
        (Status::Success, Some(kind)) => format!(
            "{}: {} = {:.1}{}",
            format_city(city),
            kind.label(),
            response.value,
            kind.unit()
        ),
        (Status::Success, None) => format!("{}: {:.1}", format_city(city), response.value),
        (Status::CityNotAvailable, _) => "City not available".to_string(),
        (Status::InvalidRequest, _) => "Invalid request".to_string(),
    }
}

/// Full report line printed by the client binary
pub fn render_report(server: &str, response: &WeatherResponse, city: &str) -> String {
    format!(
        "Received result from server ip {}. {}",
        server,
        render(response, city)
    )
}
