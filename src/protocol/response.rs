//! Response definitions
//!
//! Represents answers sent back to clients.

use super::WeatherKind;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Status {
    Success = 0,
    CityNotAvailable = 1,
    InvalidRequest = 2,
}

impl Status {
    /// Map a wire status code back to a Status
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Status::Success),
            1 => Some(Status::CityNotAvailable),
            2 => Some(Status::InvalidRequest),
            _ => None,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResponse {
    /// Status code
    pub status: Status,

    /// Echoed attribute, only set on success
    pub kind: Option<WeatherKind>,

    /// Reading, 0.0 unless status is Success
    pub value: f32,
}

impl WeatherResponse {
    /// Create a SUCCESS response carrying a reading
    pub fn success(kind: WeatherKind, value: f32) -> Self {
        Self {
            status: Status::Success,
            kind: Some(kind),
            value,
        }
    }

    /// Create a CITY_NOT_AVAILABLE response
    pub fn city_not_available() -> Self {
        Self {
            status: Status::CityNotAvailable,
            kind: None,
            value: 0.0,
        }
    }

    /// Create an INVALID_REQUEST response
    pub fn invalid_request() -> Self {
        Self {
            status: Status::InvalidRequest,
            kind: None,
            value: 0.0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
