//! Request definitions
//!
//! Represents weather queries from clients.

use std::fmt;

use super::MAX_CITY_LEN;

/// Weather attributes a client can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherKind {
    Temperature,
    Humidity,
    Wind,
    Pressure,
}

impl WeatherKind {
    /// Parse a wire type byte, ignoring ASCII case
    pub fn from_code(code: u8) -> Option<Self> {
        match code.to_ascii_lowercase() {
            b't' => Some(WeatherKind::Temperature),
            b'h' => Some(WeatherKind::Humidity),
            b'w' => Some(WeatherKind::Wind),
            b'p' => Some(WeatherKind::Pressure),
            _ => None,
        }
    }

    /// Canonical (lowercase) wire byte
    pub fn code(&self) -> u8 {
        match self {
            WeatherKind::Temperature => b't',
            WeatherKind::Humidity => b'h',
            WeatherKind::Wind => b'w',
            WeatherKind::Pressure => b'p',
        }
    }

    /// Human-readable attribute name
    pub fn label(&self) -> &'static str {
        match self {
            WeatherKind::Temperature => "Temperature",
            WeatherKind::Humidity => "Humidity",
            WeatherKind::Wind => "Wind",
            WeatherKind::Pressure => "Pressure",
        }
    }

    /// Unit suffix appended directly after the formatted value
    pub fn unit(&self) -> &'static str {
        match self {
            WeatherKind::Temperature => "°C",
            WeatherKind::Humidity => "%",
            WeatherKind::Wind => " km/h",
            WeatherKind::Pressure => " hPa",
        }
    }

    /// Range of plausible readings as `(min, max)`
    pub fn range(&self) -> (f32, f32) {
        match self {
            WeatherKind::Temperature => (-10.0, 40.0),
            WeatherKind::Humidity => (20.0, 100.0),
            WeatherKind::Wind => (0.0, 100.0),
            WeatherKind::Pressure => (950.0, 1050.0),
        }
    }

    pub const fn all() -> &'static [WeatherKind] {
        &[
            WeatherKind::Temperature,
            WeatherKind::Humidity,
            WeatherKind::Wind,
            WeatherKind::Pressure,
        ]
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single weather query
///
/// The type byte is kept raw: validating it is the server's job, and an
/// unknown type must still travel over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    type_code: u8,
    city: String,
}

impl WeatherRequest {
    /// Build a request, truncating the city to what fits on the wire
    pub fn new(type_code: u8, city: &str) -> Self {
        Self {
            type_code,
            city: truncate_city(city).to_string(),
        }
    }

    /// Build a request for a known attribute
    pub fn for_kind(kind: WeatherKind, city: &str) -> Self {
        Self::new(kind.code(), city)
    }

    /// Raw type byte as sent by the client
    pub fn type_code(&self) -> u8 {
        self.type_code
    }

    /// Parsed attribute, `None` if the type byte is not supported
    pub fn kind(&self) -> Option<WeatherKind> {
        WeatherKind::from_code(self.type_code)
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Cut a city name to at most MAX_CITY_LEN bytes on a char boundary
pub(crate) fn truncate_city(city: &str) -> &str {
    if city.len() <= MAX_CITY_LEN {
        return city;
    }
    let mut end = MAX_CITY_LEN;
    while !city.is_char_boundary(end) {
        end -= 1;
    }
    &city[..end]
}
